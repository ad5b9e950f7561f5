//! Expansion of `variants` blockstates.

use super::{generated_model_name, generated_reference, GeneratedModels};
use crate::resolver::{rotate_reference, ModelResolver};
use crate::resource_pack::{ModelVariant, NormalizedBlockstate};
use std::collections::BTreeMap;

/// Give every state key its own rotated model.
///
/// Only the first of several weighted alternatives is used. Keys whose
/// model cannot be found or has no geometry are dropped.
pub fn expand_variants(
    name: &str,
    variants: &BTreeMap<String, Vec<ModelVariant>>,
    resolver: &ModelResolver,
    generated: &mut GeneratedModels,
) -> NormalizedBlockstate {
    let mut normalized = NormalizedBlockstate::new();
    let mut count = 0;

    for (key, alternatives) in variants {
        let Some(variant) = alternatives.first() else {
            continue;
        };

        let model = match rotate_reference(variant, resolver) {
            Ok(model) => model,
            Err(e) => {
                tracing::warn!("Skipping {}[{}]: {}", name, key, e);
                continue;
            }
        };

        if !model.has_elements() {
            tracing::debug!("Dropping {}[{}]: model has no elements", name, key);
            continue;
        }

        let model_name = generated_model_name(name, count);
        count += 1;

        normalized
            .variants
            .insert(key.clone(), ModelVariant::new(generated_reference(&model_name)));
        generated.insert(model_name, model);
    }

    normalized
}
