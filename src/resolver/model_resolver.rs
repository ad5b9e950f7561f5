//! Model inheritance resolution.

use crate::error::{GeneratorError, Result};
use crate::resource_pack::{BlockModel, ResourcePack};
use crate::types::strip_resource_name;
use std::collections::HashMap;

/// Maximum depth for model inheritance to prevent infinite loops.
pub const MAX_INHERITANCE_DEPTH: usize = 10;

/// Resolves model inheritance chains against the raw store.
///
/// A resolved ("absolute") model has its own elements and a texture table
/// holding every alias of its ancestors, nearest descendant first.
pub struct ModelResolver<'a> {
    pack: &'a ResourcePack,
    cache: std::cell::RefCell<HashMap<String, BlockModel>>,
}

impl<'a> ModelResolver<'a> {
    pub fn new(pack: &'a ResourcePack) -> Self {
        Self {
            pack,
            cache: std::cell::RefCell::new(HashMap::new()),
        }
    }

    /// The raw store this resolver reads from.
    pub fn pack(&self) -> &'a ResourcePack {
        self.pack
    }

    /// Resolve a model from the store by location.
    pub fn resolve(&self, model_location: &str) -> Result<BlockModel> {
        let name = strip_resource_name(model_location);

        // Check cache first
        if let Some(cached) = self.cache.borrow().get(name) {
            return Ok(cached.clone());
        }

        let base_model = self.pack.get_model(name).ok_or_else(|| {
            GeneratorError::ModelResolution(format!("Model not found: {}", name))
        })?;
        let resolved = self.resolve_model(base_model)?;

        self.cache
            .borrow_mut()
            .insert(name.to_string(), resolved.clone());

        Ok(resolved)
    }

    /// Resolve an already loaded model. The input is never modified.
    pub fn resolve_model(&self, model: &BlockModel) -> Result<BlockModel> {
        // Inheritance merging is destructive, so work on a private copy.
        let mut resolved = model.clone();
        let mut depth = 0;

        while !resolved.has_elements() {
            let parent_location = match resolved.parent.take() {
                Some(parent) => parent,
                None => {
                    return Err(GeneratorError::ModelResolution(
                        "inheritance chain ends without elements".to_string(),
                    ))
                }
            };

            depth += 1;
            if depth > MAX_INHERITANCE_DEPTH {
                return Err(GeneratorError::ModelInheritanceTooDeep(parent_location));
            }

            let parent_name = strip_resource_name(&parent_location);
            let parent = self.pack.get_model(parent_name).ok_or_else(|| {
                GeneratorError::ModelResolution(format!("Parent model not found: {}", parent_name))
            })?;

            inherit(&mut resolved, parent);
        }

        Ok(resolved)
    }

    /// Number of models resolved so far.
    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }
}

/// Merge one parent link into a partially resolved child.
/// Child textures override parent textures.
fn inherit(child: &mut BlockModel, parent: &BlockModel) {
    for (key, value) in &parent.textures {
        child
            .textures
            .entry(key.clone())
            .or_insert_with(|| value.clone());
    }

    child.elements = parent.elements.clone();
    child.parent = parent.parent.clone();

    if child.display.is_none() {
        child.display = parent.display.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::model::{ModelElement, ModelFace};
    use crate::types::Direction;

    fn cube_element(texture: &str) -> ModelElement {
        ModelElement {
            from: [0.0, 0.0, 0.0],
            to: [16.0, 16.0, 16.0],
            rotation: None,
            shade: true,
            faces: Direction::ALL
                .iter()
                .map(|d| {
                    let mut face = ModelFace::new(texture);
                    face.cullface = Some(*d);
                    (*d, face)
                })
                .collect(),
        }
    }

    fn textures(pairs: &[(&str, &str)]) -> std::collections::BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn create_test_pack() -> ResourcePack {
        let mut pack = ResourcePack::new();

        // cube defines the geometry
        pack.add_model(
            "cube",
            BlockModel {
                textures: textures(&[("particle", "#north"), ("north", "block/dirt")]),
                elements: vec![cube_element("#north")],
                ..Default::default()
            },
        );

        // cube_all -> cube
        pack.add_model(
            "cube_all",
            BlockModel {
                parent: Some("block/cube".to_string()),
                textures: textures(&[("north", "#all"), ("all", "block/dirt")]),
                ..Default::default()
            },
        );

        // stone -> cube_all -> cube
        pack.add_model(
            "stone",
            BlockModel {
                parent: Some("minecraft:block/cube_all".to_string()),
                textures: textures(&[("all", "block/stone")]),
                ..Default::default()
            },
        );

        pack.add_model(
            "orphan",
            BlockModel {
                parent: Some("block/missing".to_string()),
                ..Default::default()
            },
        );

        pack.add_model(
            "loop_a",
            BlockModel {
                parent: Some("block/loop_b".to_string()),
                ..Default::default()
            },
        );
        pack.add_model(
            "loop_b",
            BlockModel {
                parent: Some("block/loop_a".to_string()),
                ..Default::default()
            },
        );

        pack.add_model("hollow", BlockModel::new());

        pack
    }

    #[test]
    fn test_model_with_elements_is_unchanged() {
        let pack = create_test_pack();
        let resolver = ModelResolver::new(&pack);

        let model = resolver.resolve("minecraft:block/cube").unwrap();
        assert_eq!(&model, pack.get_model("cube").unwrap());
    }

    #[test]
    fn test_three_link_chain_nearest_descendant_wins() {
        let pack = create_test_pack();
        let resolver = ModelResolver::new(&pack);

        let model = resolver.resolve("block/stone").unwrap();

        assert_eq!(
            model.textures,
            textures(&[
                ("all", "block/stone"),
                ("north", "#all"),
                ("particle", "#north"),
            ])
        );
        assert_eq!(model.elements, pack.get_model("cube").unwrap().elements);
        assert!(model.parent.is_none());
        assert_eq!(model.resolve_texture("#particle"), Some("block/stone"));

        // The raw store is untouched.
        assert!(pack.get_model("stone").unwrap().elements.is_empty());
        assert_eq!(resolver.cached_count(), 1);
    }

    #[test]
    fn test_missing_model_and_parent() {
        let pack = create_test_pack();
        let resolver = ModelResolver::new(&pack);

        assert!(matches!(
            resolver.resolve("block/nonexistent"),
            Err(GeneratorError::ModelResolution(_))
        ));
        assert!(matches!(
            resolver.resolve("block/orphan"),
            Err(GeneratorError::ModelResolution(_))
        ));
    }

    #[test]
    fn test_chain_without_elements_fails() {
        let pack = create_test_pack();
        let resolver = ModelResolver::new(&pack);

        assert!(matches!(
            resolver.resolve("hollow"),
            Err(GeneratorError::ModelResolution(_))
        ));
        assert!(matches!(
            resolver.resolve("loop_a"),
            Err(GeneratorError::ModelInheritanceTooDeep(_))
        ));
    }
}
