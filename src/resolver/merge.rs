//! Merging of several rotated models into one.
//!
//! Multipart blockstates draw every matching rule's model at once. Before
//! their geometry can be concatenated, each source's texture aliases get a
//! per-source suffix so that e.g. the `#side` of a fence post and the `#side`
//! of a fence arm stay distinct.

use crate::resource_pack::model::{TextureRef, PARTICLE};
use crate::resource_pack::BlockModel;
use std::collections::BTreeMap;

/// Alias suffix for the `index`-th merged source.
pub fn part_suffix(index: usize) -> String {
    format!("_part{}__", index)
}

/// Combine models into one: texture tables are unioned after renaming, later
/// inputs winning on collision (only `particle` can collide), and element
/// lists are concatenated in input order.
pub fn merge_models(models: &[BlockModel]) -> BlockModel {
    let mut renamed = models
        .iter()
        .enumerate()
        .map(|(i, model)| rename_textures(model, &part_suffix(i)));

    let Some(mut merged) = renamed.next() else {
        return BlockModel::new();
    };

    for model in renamed {
        merged.textures.extend(model.textures);
        merged.elements.extend(model.elements);
    }

    merged
}

/// Copy of `model` with every alias except `particle` suffixed, both as a
/// key and wherever it is referenced.
pub fn rename_textures(model: &BlockModel, suffix: &str) -> BlockModel {
    let mut renamed = model.clone();

    renamed.textures = model
        .textures
        .iter()
        .map(|(key, value)| (rename_key(key, suffix), rename_value(value, suffix)))
        .collect::<BTreeMap<_, _>>();

    for element in &mut renamed.elements {
        for face in element.faces.values_mut() {
            face.texture = rename_value(&face.texture, suffix);
        }
    }

    renamed
}

fn rename_key(key: &str, suffix: &str) -> String {
    if key == PARTICLE {
        key.to_string()
    } else {
        format!("{}{}", key, suffix)
    }
}

fn rename_value(value: &str, suffix: &str) -> String {
    match TextureRef::parse(value) {
        TextureRef::Alias(alias) => format!("#{}", rename_key(alias, suffix)),
        TextureRef::Path(path) => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::{ModelElement, ModelFace};
    use crate::types::Direction;

    fn model(textures: &[(&str, &str)], face_texture: &str) -> BlockModel {
        BlockModel {
            textures: textures
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            elements: vec![ModelElement {
                from: [0.0, 0.0, 0.0],
                to: [16.0, 16.0, 16.0],
                rotation: None,
                shade: true,
                faces: BTreeMap::from([(Direction::Up, ModelFace::new(face_texture))]),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_rename_textures() {
        let source = model(
            &[
                ("particle", "#texture"),
                ("texture", "block/oak_planks"),
                ("side", "#texture"),
            ],
            "#side",
        );
        let renamed = rename_textures(&source, "_part1__");

        assert_eq!(renamed.textures["particle"], "#texture_part1__");
        assert_eq!(renamed.textures["texture_part1__"], "block/oak_planks");
        assert_eq!(renamed.textures["side_part1__"], "#texture_part1__");
        assert_eq!(renamed.elements[0].faces[&Direction::Up].texture, "#side_part1__");
        assert_eq!(renamed.resolve_texture("#side_part1__"), Some("block/oak_planks"));

        // The source is untouched.
        assert!(source.textures.contains_key("side"));
    }

    #[test]
    fn test_merge_models() {
        let post = model(&[("particle", "block/a"), ("texture", "block/a")], "#texture");
        let arm = model(&[("particle", "block/b"), ("texture", "block/b")], "#texture");

        let merged = merge_models(&[post, arm]);

        assert_eq!(merged.elements.len(), 2);
        assert_eq!(merged.textures["texture_part0__"], "block/a");
        assert_eq!(merged.textures["texture_part1__"], "block/b");
        assert_eq!(merged.textures["particle"], "block/b");
        assert_eq!(merged.elements[0].faces[&Direction::Up].texture, "#texture_part0__");
        assert_eq!(merged.elements[1].faces[&Direction::Up].texture, "#texture_part1__");
    }

    #[test]
    fn test_merge_nothing() {
        assert_eq!(merge_models(&[]), BlockModel::new());
    }
}
