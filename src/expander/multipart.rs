//! Expansion of `multipart` blockstates into explicit variants.
//!
//! Every attribute mentioned by a condition gets a value domain. Each
//! combination of values is checked against all rules; the set of rules that
//! apply (as a bit string) picks the merged model for that combination.

use super::{generated_model_name, generated_reference, GeneratedModels};
use crate::resolver::{merge_models, rotate_reference, ModelResolver};
use crate::resource_pack::{ModelVariant, MultipartCase, NormalizedBlockstate};
use std::collections::{BTreeMap, HashMap};

/// Attribute value domains in first-seen order.
pub type ConditionDomains = Vec<(String, Vec<String>)>;

/// Collect every attribute and value the rules' conditions mention.
///
/// A `true` token also admits `false`, and a numeric token also admits `0`,
/// since those are the values a block has when the attribute is "off".
pub fn collect_domains(cases: &[MultipartCase]) -> ConditionDomains {
    let mut domains: ConditionDomains = Vec::new();

    let condition_cases = cases
        .iter()
        .filter_map(|case| case.when.as_ref())
        .flat_map(|when| when.cases());

    for case in condition_cases {
        for (attribute, value) in case {
            let index = match domains.iter().position(|(name, _)| name == attribute) {
                Some(index) => index,
                None => {
                    domains.push((attribute.clone(), Vec::new()));
                    domains.len() - 1
                }
            };
            let values = &mut domains[index].1;

            for token in value.alternatives() {
                if token == "true" {
                    add_value(values, "false");
                }
                if token.parse::<i64>().is_ok() {
                    add_value(values, "0");
                }
                add_value(values, token);
            }
        }
    }

    domains
}

fn add_value(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Number of attribute combinations the domains span.
pub fn combination_count(domains: &ConditionDomains) -> usize {
    domains.iter().map(|(_, values)| values.len()).product()
}

/// The `index`-th combination, first attribute varying fastest.
fn combination(domains: &ConditionDomains, index: usize) -> Vec<(&str, &str)> {
    let mut rest = index;
    domains
        .iter()
        .map(|(attribute, values)| {
            let value = &values[rest % values.len()];
            rest /= values.len();
            (attribute.as_str(), value.as_str())
        })
        .collect()
}

/// Variant key of a combination: `attr=value` pairs joined with commas.
fn variant_key(combination: &[(&str, &str)]) -> String {
    combination
        .iter()
        .map(|(attribute, value)| format!("{}={}", attribute, value))
        .collect::<Vec<_>>()
        .join(",")
}

/// Expand multipart rules into one variant per attribute combination.
///
/// Combinations under which no rule applies are left out. Combinations that
/// select the same rules share one merged model.
pub fn expand_multipart(
    name: &str,
    cases: &[MultipartCase],
    resolver: &ModelResolver,
    generated: &mut GeneratedModels,
) -> NormalizedBlockstate {
    let domains = collect_domains(cases);
    let total = combination_count(&domains);
    tracing::debug!(
        "{}: {} rules, {} attributes, {} combinations",
        name,
        cases.len(),
        domains.len(),
        total
    );

    let mut normalized = NormalizedBlockstate::new();
    // Rule bit string -> generated model name, None if the merge had no geometry.
    let mut references: HashMap<String, Option<String>> = HashMap::new();
    let mut count = 0;

    for index in 0..total {
        let combination = combination(&domains, index);
        let properties: BTreeMap<String, String> = combination
            .iter()
            .map(|(attribute, value)| (attribute.to_string(), value.to_string()))
            .collect();

        let applied: Vec<bool> = cases
            .iter()
            .map(|case| match &case.when {
                None => true,
                Some(condition) => condition.matches(&properties),
            })
            .collect();

        if !applied.contains(&true) {
            continue;
        }

        let bits: String = applied.iter().map(|&a| if a { '1' } else { '0' }).collect();

        let model_name = match references.get(&bits) {
            Some(model_name) => model_name.clone(),
            None => {
                let model_name = build_merged(name, cases, &applied, resolver, count, generated);
                if model_name.is_some() {
                    count += 1;
                }
                references.insert(bits, model_name.clone());
                model_name
            }
        };

        if let Some(model_name) = model_name {
            normalized.variants.insert(
                variant_key(&combination),
                ModelVariant::new(generated_reference(&model_name)),
            );
        }
    }

    normalized
}

/// Rotate and merge the models of the applied rules. Returns the generated
/// model's name, or None if the result has no geometry.
fn build_merged(
    name: &str,
    cases: &[MultipartCase],
    applied: &[bool],
    resolver: &ModelResolver,
    index: usize,
    generated: &mut GeneratedModels,
) -> Option<String> {
    let models: Vec<_> = cases
        .iter()
        .zip(applied)
        .filter(|(_, applied)| **applied)
        .filter_map(|(case, _)| case.apply.variants().into_iter().next())
        .filter_map(|variant| match rotate_reference(variant, resolver) {
            Ok(model) => Some(model),
            Err(e) => {
                tracing::warn!("Skipping part of {}: {}", name, e);
                None
            }
        })
        .collect();

    let merged = merge_models(&models);
    if !merged.has_elements() {
        return None;
    }

    let model_name = generated_model_name(name, index);
    generated.insert(model_name.clone(), merged);
    Some(model_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::{BlockModel, BlockstateDefinition, ModelElement, ModelFace, ResourcePack};
    use crate::types::Direction;

    fn cube_model(texture: &str) -> BlockModel {
        BlockModel {
            textures: [("all".to_string(), texture.to_string())].into_iter().collect(),
            elements: vec![ModelElement {
                from: [6.0, 0.0, 6.0],
                to: [10.0, 16.0, 10.0],
                rotation: None,
                shade: true,
                faces: Direction::ALL
                    .iter()
                    .map(|d| (*d, ModelFace::new("#all")))
                    .collect(),
            }],
            ..Default::default()
        }
    }

    fn test_pack() -> ResourcePack {
        let mut pack = ResourcePack::new();
        pack.add_model("post", cube_model("block/oak_planks"));
        pack.add_model("side", cube_model("block/oak_log"));
        pack
    }

    fn cases(json: &str) -> Vec<MultipartCase> {
        match serde_json::from_str::<BlockstateDefinition>(json).unwrap() {
            BlockstateDefinition::Multipart(cases) => cases,
            _ => panic!("Expected Multipart"),
        }
    }

    #[test]
    fn test_collect_domains() {
        let cases = cases(
            r#"{ "multipart": [
                { "when": { "north": "true" }, "apply": { "model": "block/side" } },
                { "when": { "OR": [{ "facing": "east|west" }, { "power": "15" }] }, "apply": { "model": "block/side" } },
                { "when": { "AND": [{ "hidden": "true" }] }, "apply": { "model": "block/side" } }
            ] }"#,
        );

        let domains = collect_domains(&cases);
        assert_eq!(
            domains,
            vec![
                ("north".to_string(), vec!["false".to_string(), "true".to_string()]),
                ("facing".to_string(), vec!["east".to_string(), "west".to_string()]),
                ("power".to_string(), vec!["0".to_string(), "15".to_string()]),
            ]
        );
        assert_eq!(combination_count(&domains), 8);
        assert_eq!(combination_count(&Vec::new()), 1);
    }

    #[test]
    fn test_two_booleans_expand_to_four_keys() {
        let pack = test_pack();
        let resolver = ModelResolver::new(&pack);
        let cases = cases(
            r#"{ "multipart": [
                { "apply": { "model": "block/post" } },
                { "when": { "north": "true" }, "apply": { "model": "block/side" } },
                { "when": { "east": "true" }, "apply": { "model": "block/side", "y": 90 } }
            ] }"#,
        );

        let mut generated = GeneratedModels::new();
        let normalized = expand_multipart("fence", &cases, &resolver, &mut generated);

        let keys: Vec<_> = normalized.variants.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                "north=false,east=false",
                "north=false,east=true",
                "north=true,east=false",
                "north=true,east=true",
            ]
        );
        assert_eq!(generated.len(), 4);

        let both = &normalized.variants["north=true,east=true"].model;
        let both = &generated[both.trim_start_matches("minecraft:block/")];
        assert_eq!(both.elements.len(), 3);
        assert_eq!(both.textures["all_part0__"], "block/oak_planks");
        assert_eq!(both.textures["all_part2__"], "block/oak_log");
    }

    #[test]
    fn test_unmatched_combinations_are_omitted() {
        let pack = test_pack();
        let resolver = ModelResolver::new(&pack);
        let cases = cases(
            r#"{ "multipart": [
                { "when": { "north": "true" }, "apply": { "model": "block/side" } },
                { "when": { "east": "true" }, "apply": { "model": "block/side" } }
            ] }"#,
        );

        let mut generated = GeneratedModels::new();
        let normalized = expand_multipart("wall", &cases, &resolver, &mut generated);

        assert_eq!(normalized.len(), 3);
        assert!(!normalized.variants.contains_key("north=false,east=false"));
    }

    #[test]
    fn test_identical_rule_sets_share_a_model() {
        let pack = test_pack();
        let resolver = ModelResolver::new(&pack);
        let cases = cases(
            r#"{ "multipart": [
                { "when": { "facing": "north|south" }, "apply": { "model": "block/side" } },
                { "when": { "facing": "east" }, "apply": { "model": "block/post" } }
            ] }"#,
        );

        let mut generated = GeneratedModels::new();
        let normalized = expand_multipart("rail", &cases, &resolver, &mut generated);

        assert_eq!(normalized.len(), 3);
        assert_eq!(generated.len(), 2);
        assert_eq!(
            normalized.variants["facing=north"],
            normalized.variants["facing=south"]
        );
        assert_ne!(
            normalized.variants["facing=north"],
            normalized.variants["facing=east"]
        );
    }

    #[test]
    fn test_and_rules_never_apply() {
        let pack = test_pack();
        let resolver = ModelResolver::new(&pack);
        let cases = cases(
            r#"{ "multipart": [
                { "when": { "AND": [{ "up": "true" }] }, "apply": { "model": "block/post" } }
            ] }"#,
        );

        let mut generated = GeneratedModels::new();
        let normalized = expand_multipart("odd", &cases, &resolver, &mut generated);
        assert!(normalized.is_empty());
        assert!(generated.is_empty());
    }
}
