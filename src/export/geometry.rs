//! Geometry encoding.
//!
//! A model is serialized as a 4-byte header followed by one fixed-size
//! record per element:
//!
//! | bytes | content |
//! |---|---|
//! | 0..4 | `from` corner, `(v + 16) / 48` scaled to 0-255, then 255 |
//! | 4..8 | `to` corner, same encoding |
//! | 8..12 | rotation axis unit vector x 255, then angle code `angle / 22.5 + 2` |
//! | 12..16 | rotation origin, `v / 16` scaled to 0-255, then 255 |
//! | 16..64 | six 8-byte face records in [`Direction::ENCODING_ORDER`] |
//!
//! A face record is the packed atlas location followed by the UV rectangle
//! scaled to 0-255, or [`MISSING_FACE`] if the face is absent or its texture
//! is not in the atlas.

use crate::atlas::TextureAtlas;
use crate::resource_pack::{BlockModel, ModelElement, ModelFace};
use crate::types::{strip_resource_name, Axis, Direction};
use glam::Vec3;

/// Size of the per-model header.
pub const HEADER_LEN: usize = 4;

/// Size of one encoded element.
pub const ELEMENT_RECORD_LEN: usize = 64;

/// Face record for an absent or untextured face.
pub const MISSING_FACE: [u8; 8] = [0, 0, 0, 0xFF, 0, 0, 0, 0];

/// Angle code of an element without rotation.
const NO_ROTATION_CODE: u8 = 2;

/// Encoded length of a model with `element_count` elements.
pub fn encoded_len(element_count: usize) -> usize {
    HEADER_LEN + ELEMENT_RECORD_LEN * element_count
}

/// Encode a resolved model against an atlas.
pub fn encode_model(model: &BlockModel, atlas: &TextureAtlas) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(model.elements.len()));
    bytes.extend_from_slice(&[(model.elements.len() & 0xFF) as u8, 0, 0, 0xFF]);

    for element in &model.elements {
        encode_element(&mut bytes, model, element, atlas);
    }

    bytes
}

fn encode_element(out: &mut Vec<u8>, model: &BlockModel, element: &ModelElement, atlas: &TextureAtlas) {
    let (from, to) = compensated_box(element);

    out.extend(from.iter().map(|&v| scale_corner(v)));
    out.push(255);
    out.extend(to.iter().map(|&v| scale_corner(v)));
    out.push(255);

    match &element.rotation {
        Some(rotation) => {
            out.extend(rotation.axis.unit_vector().iter().map(|&v| scale_unit(v)));
            out.push(angle_code(rotation.angle));
            out.extend(rotation.origin.iter().map(|&v| scale_unit(v / 16.0)));
        }
        None => {
            out.extend(Axis::X.unit_vector().iter().map(|&v| scale_unit(v)));
            out.push(NO_ROTATION_CODE);
            out.extend([8.0f32; 3].iter().map(|&v| scale_unit(v / 16.0)));
        }
    }
    out.push(255);

    for direction in Direction::ENCODING_ORDER {
        let record = element
            .faces
            .get(&direction)
            .and_then(|face| encode_face(model, element, direction, face, atlas))
            .unwrap_or(MISSING_FACE);
        out.extend_from_slice(&record);
    }
}

fn encode_face(
    model: &BlockModel,
    element: &ModelElement,
    direction: Direction,
    face: &ModelFace,
    atlas: &TextureAtlas,
) -> Option<[u8; 8]> {
    let texture = model.resolve_texture(&face.texture)?;
    let location = atlas.location(strip_resource_name(texture))?;
    let uv = face.uv.unwrap_or_else(|| element.default_uv(direction));

    let [l0, l1, l2, l3] = location.encode();
    let [u0, v0, u1, v1] = uv.map(|v| scale_unit(v / 16.0));
    Some([l0, l1, l2, l3, u0, v0, u1, v1])
}

/// Box corners, stretched back to their footprint if the element's
/// rotation asks for rescaling.
fn compensated_box(element: &ModelElement) -> ([f32; 3], [f32; 3]) {
    let Some(rotation) = element.rotation.as_ref().filter(|r| r.rescale) else {
        return (element.from, element.to);
    };

    let from = Vec3::from_array(element.from);
    let to = Vec3::from_array(element.to);
    let center = (from + to) * 0.5;

    let factor = rotation.rescale_factor();
    let scale = match rotation.axis {
        Axis::X => Vec3::new(1.0, factor, factor),
        Axis::Y => Vec3::new(factor, 1.0, factor),
        Axis::Z => Vec3::new(factor, factor, 1.0),
    };

    (
        (center + (from - center) * scale).to_array(),
        (center + (to - center) * scale).to_array(),
    )
}

/// Corners may lie in -16..32 once rotated or rescaled.
fn scale_corner(v: f32) -> u8 {
    scale_unit((v + 16.0) / 48.0)
}

fn scale_unit(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn angle_code(angle: f32) -> u8 {
    (angle / 22.5 + 2.0).round().clamp(0.0, 255.0) as u8
}
