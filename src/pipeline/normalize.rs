//! Rewrites applied to generated models before they are written out.

use crate::resource_pack::model::{TextureRef, PARTICLE};
use crate::resource_pack::{BlockModel, ModelElement, ModelFace};
use crate::types::{strip_resource_name, Direction};
use std::collections::{BTreeMap, HashMap};

/// Texture alias of the marker faces.
pub const MARKER_ALIAS: &str = "vpt_marker";

/// Name of a generated model's marker texture.
pub fn marker_texture_name(model_name: &str) -> String {
    format!("{}_data", model_name)
}

/// Flatten alias chains so every texture key is the stripped concrete path
/// it points at, and drop the parent link.
///
/// `particle` keeps its key. Aliases that lead nowhere are dropped, and faces
/// referencing them keep their unresolvable reference.
pub fn simplify(model: &mut BlockModel) {
    model.parent = None;

    let mut textures = BTreeMap::new();
    let mut renames: HashMap<String, String> = HashMap::new();

    for key in model.textures.keys() {
        let reference = format!("#{}", key);
        let Some(path) = model.resolve_texture(&reference) else {
            tracing::debug!("Dropping unresolvable texture alias #{}", key);
            continue;
        };

        let new_key = if key == PARTICLE {
            PARTICLE.to_string()
        } else {
            strip_resource_name(path).to_string()
        };
        textures.insert(new_key.clone(), path.to_string());
        renames.insert(key.clone(), new_key);
    }

    for face in model
        .elements
        .iter_mut()
        .flat_map(|element| element.faces.values_mut())
    {
        match TextureRef::parse(&face.texture) {
            TextureRef::Alias(alias) => {
                if let Some(new_key) = renames.get(alias) {
                    face.texture = format!("#{}", new_key);
                }
            }
            TextureRef::Path(path) => {
                let new_key = strip_resource_name(path).to_string();
                textures
                    .entry(new_key.clone())
                    .or_insert_with(|| path.to_string());
                face.texture = format!("#{}", new_key);
            }
        }
    }

    model.textures = textures;
}

/// Switch off engine lighting for baked geometry.
pub fn disable_shading(model: &mut BlockModel) {
    model.ambient_occlusion = false;
    for element in &mut model.elements {
        element.shade = false;
    }
}

/// Append the full-block marker element pointing at the model's marker texture.
pub fn inject_marker(model: &mut BlockModel, model_name: &str) {
    model.textures.insert(
        MARKER_ALIAS.to_string(),
        format!("minecraft:block/{}", marker_texture_name(model_name)),
    );

    let faces = Direction::ALL
        .iter()
        .map(|&direction| {
            let mut face = ModelFace::new(format!("#{}", MARKER_ALIAS));
            face.uv = Some([0.0, 0.0, 16.0, 16.0]);
            (direction, face)
        })
        .collect();

    model.elements.push(ModelElement {
        from: [0.0, 0.0, 0.0],
        to: [16.0, 16.0, 16.0],
        rotation: None,
        shade: false,
        faces,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_faces(textures: &[(&str, &str)], faces: &[(Direction, &str)]) -> BlockModel {
        BlockModel {
            parent: Some("block/cube".to_string()),
            textures: textures
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            elements: vec![ModelElement {
                from: [0.0, 0.0, 0.0],
                to: [16.0, 16.0, 16.0],
                rotation: None,
                shade: true,
                faces: faces
                    .iter()
                    .map(|(d, t)| (*d, ModelFace::new(*t)))
                    .collect(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_simplify() {
        let mut model = model_with_faces(
            &[
                ("particle", "#side"),
                ("side", "#all"),
                ("all", "minecraft:block/stone"),
                ("top", "block/stone_top"),
                ("dangling", "#nowhere"),
            ],
            &[
                (Direction::Up, "#top"),
                (Direction::North, "#side"),
                (Direction::South, "block/dirt"),
                (Direction::Down, "#nowhere"),
            ],
        );

        simplify(&mut model);

        assert!(model.parent.is_none());
        let expected: BTreeMap<String, String> = [
            ("particle", "minecraft:block/stone"),
            ("stone", "minecraft:block/stone"),
            ("stone_top", "block/stone_top"),
            ("dirt", "block/dirt"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(model.textures, expected);

        let faces = &model.elements[0].faces;
        assert_eq!(faces[&Direction::Up].texture, "#stone_top");
        assert_eq!(faces[&Direction::North].texture, "#stone");
        assert_eq!(faces[&Direction::South].texture, "#dirt");
        assert_eq!(faces[&Direction::Down].texture, "#nowhere");
    }

    #[test]
    fn test_simplify_keeps_resolution() {
        let mut model = model_with_faces(
            &[("a_part0__", "block/planks"), ("b_part1__", "#a_part0__")],
            &[(Direction::Up, "#b_part1__")],
        );
        let before = model.resolve_texture("#b_part1__").map(str::to_string);

        simplify(&mut model);
        let face = &model.elements[0].faces[&Direction::Up];
        assert_eq!(model.resolve_texture(&face.texture).map(str::to_string), before);
    }

    #[test]
    fn test_disable_shading() {
        let mut model = model_with_faces(&[], &[]);
        disable_shading(&mut model);
        assert!(!model.ambient_occlusion);
        assert!(model.elements.iter().all(|e| !e.shade));
    }

    #[test]
    fn test_inject_marker() {
        let mut model = model_with_faces(&[], &[]);
        inject_marker(&mut model, "stone_generated_model_0");

        assert_eq!(model.elements.len(), 2);
        assert_eq!(
            model.textures[MARKER_ALIAS],
            "minecraft:block/stone_generated_model_0_data"
        );

        let marker = &model.elements[1];
        assert!(!marker.shade);
        assert_eq!(marker.faces.len(), 6);
        assert!(marker
            .faces
            .values()
            .all(|f| f.texture == "#vpt_marker" && f.uv == Some([0.0, 0.0, 16.0, 16.0])));
    }
}
