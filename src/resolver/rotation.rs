//! Blockstate rotation of resolved models.
//!
//! A variant may rotate its model by quarter turns about X, then Y. The
//! rotator bakes that rotation into an independent copy of the geometry so
//! downstream consumers never see `x`/`y` on a reference.

use super::ModelResolver;
use crate::error::{GeneratorError, Result};
use crate::resource_pack::{BlockModel, ModelElement, ModelFace, ModelVariant};
use crate::types::{Axis, BlockTransform, Direction, ElementRotation, Rotation};
use std::collections::BTreeMap;

/// Resolve and rotate the model a variant points at.
///
/// Fails only if the referenced model is absent from the store. If its
/// inheritance chain cannot be resolved, the unrotated base model is
/// returned instead.
pub fn rotate_reference(variant: &ModelVariant, resolver: &ModelResolver) -> Result<BlockModel> {
    let base = resolver.pack().get_model(&variant.model).ok_or_else(|| {
        GeneratorError::ResourceNotFound(format!("model {}", variant.model))
    })?;

    let resolved = match resolver.resolve(&variant.model) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::debug!("Using unresolved model {}: {}", variant.model, e);
            return Ok(base.clone());
        }
    };

    let transform = BlockTransform::new(variant.x, variant.y);
    Ok(rotate_model(&resolved, &transform))
}

/// Rotate every element of a model. The input is left untouched.
pub fn rotate_model(model: &BlockModel, transform: &BlockTransform) -> BlockModel {
    let mut rotated = model.clone();
    if transform.is_identity() {
        return rotated;
    }

    rotated.elements = model
        .elements
        .iter()
        .map(|element| rotate_element(element, transform))
        .collect();
    rotated
}

/// Rotate a single element by a block transform.
pub fn rotate_element(element: &ModelElement, transform: &BlockTransform) -> ModelElement {
    if transform.is_identity() {
        return element.clone();
    }

    let (from, to) = transform.rotate_box(element.from, element.to);

    let faces: BTreeMap<Direction, ModelFace> = element
        .faces
        .iter()
        .map(|(&direction, face)| {
            let (new_direction, new_face) = rotate_face(element, direction, face, transform);
            (new_direction, new_face)
        })
        .collect();

    let rotation = element
        .rotation
        .as_ref()
        .map(|rotation| rotate_element_rotation(rotation, transform));

    ModelElement {
        from,
        to,
        rotation,
        shade: element.shade,
        faces,
    }
}

fn rotate_face(
    element: &ModelElement,
    direction: Direction,
    face: &ModelFace,
    transform: &BlockTransform,
) -> (Direction, ModelFace) {
    let mut rotated = face.clone();

    // UVs are projected from the box before it moves.
    if rotated.uv.is_none() {
        rotated.uv = Some(element.default_uv(direction));
    }

    let after_x = direction.rotate_x(transform.x);
    let after_y = after_x.rotate_y(transform.y);

    rotated.cullface = face.cullface.map(|cull| transform.rotate_direction(cull));

    let mut degrees = face.rotation;
    if after_x.axis() == Axis::X {
        degrees += transform.x.degrees();
    }
    if after_y.axis() == Axis::Y {
        degrees += transform.y.degrees();
    }
    rotated.rotation = degrees.rem_euclid(360);

    (after_y, rotated)
}

fn rotate_element_rotation(rotation: &ElementRotation, transform: &BlockTransform) -> ElementRotation {
    let axis = transform.rotate_axis(rotation.axis);
    let origin = transform.rotate_point(rotation.origin);

    let mut angle = rotation.angle;
    if matches!(transform.x, Rotation::Deg90 | Rotation::Deg180) {
        angle = -angle;
    }
    match (axis, transform.y) {
        (Axis::Z, Rotation::Deg180 | Rotation::Deg270) => angle = -angle,
        (Axis::X, Rotation::Deg90 | Rotation::Deg180) => angle = -angle,
        _ => {}
    }

    ElementRotation {
        origin,
        axis,
        // Avoid serializing "-0.0".
        angle: if angle == 0.0 { 0.0 } else { angle },
        rescale: rotation.rescale,
    }
}
