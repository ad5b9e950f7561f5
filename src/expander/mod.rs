//! Blockstate expansion.
//!
//! Both blockstate forms are reduced to a [`NormalizedBlockstate`]: every
//! render-state key points at exactly one generated model, already rotated
//! (and for multipart, merged) so it can be encoded without further context.

pub mod multipart;
pub mod variants;

pub use multipart::expand_multipart;
pub use variants::expand_variants;

use crate::resolver::ModelResolver;
use crate::resource_pack::{BlockModel, BlockstateDefinition, NormalizedBlockstate};
use std::collections::BTreeMap;

/// Models created during expansion, keyed by their generated name.
pub type GeneratedModels = BTreeMap<String, BlockModel>;

/// Name of the `index`-th model generated for a blockstate.
pub fn generated_model_name(blockstate: &str, index: usize) -> String {
    format!("{}_generated_model_{}", blockstate, index)
}

/// Model location written into output blockstates.
pub fn generated_reference(name: &str) -> String {
    format!("minecraft:block/{}", name)
}

/// Expand a blockstate of either form, adding its models to `generated`.
pub fn expand_blockstate(
    name: &str,
    definition: &BlockstateDefinition,
    resolver: &ModelResolver,
    generated: &mut GeneratedModels,
) -> NormalizedBlockstate {
    match definition {
        BlockstateDefinition::Variants(variants) => {
            expand_variants(name, variants, resolver, generated)
        }
        BlockstateDefinition::Multipart(cases) => expand_multipart(name, cases, resolver, generated),
    }
}
