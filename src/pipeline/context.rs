//! Per-run state threaded through the pipeline phases.

use super::{GeneratorConfig, GenerationStats};
use crate::atlas::TextureAtlas;
use crate::expander::GeneratedModels;
use crate::resource_pack::{NormalizedBlockstate, ResourcePack};
use std::collections::BTreeMap;

/// Everything one generation run reads and produces.
///
/// The raw store is borrowed immutably. All generated state lives here, so
/// separate runs never share anything.
pub struct PipelineContext<'a> {
    /// Layered input assets.
    pub pack: &'a ResourcePack,
    pub config: &'a GeneratorConfig,
    /// Rewritten blockstates by block ID.
    pub blockstates: BTreeMap<String, NormalizedBlockstate>,
    /// Generated models by generated name.
    pub generated: GeneratedModels,
    /// Packed atlas, empty until the packing phase.
    pub atlas: TextureAtlas,
    /// Encoded geometry, one row per generated model in name order.
    pub geometry_rows: Vec<Vec<u8>>,
    pub stats: GenerationStats,
}

impl<'a> PipelineContext<'a> {
    pub fn new(pack: &'a ResourcePack, config: &'a GeneratorConfig) -> Self {
        Self {
            pack,
            config,
            blockstates: BTreeMap::new(),
            generated: GeneratedModels::new(),
            atlas: TextureAtlas::empty(),
            geometry_rows: Vec::new(),
            stats: GenerationStats::default(),
        }
    }
}
