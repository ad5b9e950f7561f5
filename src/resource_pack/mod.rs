//! Resource pack loading and parsing.
//!
//! This module handles loading Minecraft resource packs (ZIP files or directories)
//! and parsing their contents including blockstates, models, and textures.

pub mod loader;
pub mod blockstate;
pub mod model;
pub mod texture;

pub use blockstate::{
    BlockstateDefinition, ModelVariant, MultipartCase, MultipartCondition, NormalizedBlockstate,
};
pub use model::{BlockModel, ModelElement, ModelFace};
pub use texture::Texture;

use crate::types::strip_resource_name;
use std::collections::{BTreeMap, HashMap};

/// The raw asset store: everything read from the input archives, before any
/// generation happens. Only the `minecraft` namespace is kept.
#[derive(Debug, Default, Clone)]
pub struct ResourcePack {
    /// Contents of `pack.mcmeta`, if present.
    pub metadata: Option<PackMetadata>,

    /// Blockstate definitions by block ID (e.g. "oak_fence").
    pub blockstates: BTreeMap<String, BlockstateDefinition>,

    /// Block models by path below `models/block/` (e.g. "cube_all").
    pub models: HashMap<String, BlockModel>,

    /// Encoded block texture images by path below `textures/block/`,
    /// companions (`_n`, `_s`) included.
    pub textures: BTreeMap<String, Vec<u8>>,
}

impl ResourcePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a model by location (e.g., "minecraft:block/stone" or "stone").
    pub fn get_model(&self, location: &str) -> Option<&BlockModel> {
        self.models.get(strip_resource_name(location))
    }

    /// Get encoded texture bytes by location (e.g., "minecraft:block/stone").
    pub fn get_texture(&self, location: &str) -> Option<&[u8]> {
        self.textures
            .get(strip_resource_name(location))
            .map(|data| data.as_slice())
    }

    /// Add a blockstate definition.
    pub fn add_blockstate(&mut self, block_id: &str, definition: BlockstateDefinition) {
        self.blockstates.insert(block_id.to_string(), definition);
    }

    /// Add a model.
    pub fn add_model(&mut self, model_path: &str, model: BlockModel) {
        self.models.insert(model_path.to_string(), model);
    }

    /// Add an encoded texture.
    pub fn add_texture(&mut self, texture_path: &str, data: Vec<u8>) {
        self.textures.insert(texture_path.to_string(), data);
    }

    /// Lay `top` over this pack. Entries of `top` win on identical paths.
    pub fn overlay(&mut self, top: ResourcePack) {
        self.blockstates.extend(top.blockstates);
        self.models.extend(top.models);
        self.textures.extend(top.textures);
        if top.metadata.is_some() {
            self.metadata = top.metadata;
        }
    }

    /// Names of the block textures to pack, without their companions.
    pub fn block_texture_names(&self) -> Vec<&str> {
        self.textures
            .keys()
            .map(|name| name.as_str())
            .filter(|name| !texture::is_companion(name, self))
            .collect()
    }

    /// Get the total number of blockstate definitions.
    pub fn blockstate_count(&self) -> usize {
        self.blockstates.len()
    }

    /// Get the total number of models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Get the total number of texture files, companions included.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

/// A `pack.mcmeta` document. Unknown fields are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct PackMetadata(pub serde_json::Value);

impl PackMetadata {
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents).map(PackMetadata)
    }

    /// A minimal document with the given format.
    pub fn with_format(pack_format: u64) -> Self {
        PackMetadata(serde_json::json!({
            "pack": { "pack_format": pack_format, "description": "" }
        }))
    }

    /// The `pack.pack_format` number.
    pub fn pack_format(&self) -> Option<u64> {
        self.0.get("pack")?.get("pack_format")?.as_u64()
    }

    /// Copy of this document with only `pack.description` replaced.
    pub fn with_description(&self, description: &str) -> Self {
        let mut value = self.0.clone();
        if !value.is_object() {
            value = serde_json::json!({});
        }
        if let Some(root) = value.as_object_mut() {
            let pack = root
                .entry("pack")
                .or_insert_with(|| serde_json::json!({}));
            if !pack.is_object() {
                *pack = serde_json::json!({});
            }
            if let Some(pack) = pack.as_object_mut() {
                pack.insert(
                    "description".to_string(),
                    serde_json::Value::String(description.to_string()),
                );
            }
        }
        PackMetadata(value)
    }
}
