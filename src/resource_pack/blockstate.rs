//! Blockstate definition parsing.
//!
//! Blockstates define how block properties map to model variants.
//! There are two formats: "variants" and "multipart".

use crate::types::Rotation;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A blockstate definition from blockstates/*.json.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockstateDefinition {
    /// Simple variants: property combinations map to models.
    Variants(BTreeMap<String, Vec<ModelVariant>>),
    /// Multipart: conditional model application.
    Multipart(Vec<MultipartCase>),
}

impl<'de> Deserialize<'de> for BlockstateDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawBlockstate {
            variants: Option<BTreeMap<String, VariantValue>>,
            multipart: Option<Vec<MultipartCase>>,
        }

        let raw = RawBlockstate::deserialize(deserializer)?;

        // A `multipart` key wins over `variants`.
        if let Some(multipart) = raw.multipart {
            Ok(BlockstateDefinition::Multipart(multipart))
        } else if let Some(variants) = raw.variants {
            let parsed = variants
                .into_iter()
                .map(|(k, v)| (k, v.into_vec()))
                .collect();
            Ok(BlockstateDefinition::Variants(parsed))
        } else {
            Ok(BlockstateDefinition::Variants(BTreeMap::new()))
        }
    }
}

/// A variant value can be a single model or an array of weighted models.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum VariantValue {
    Single(ModelVariant),
    Multiple(Vec<ModelVariant>),
}

impl VariantValue {
    fn into_vec(self) -> Vec<ModelVariant> {
        match self {
            VariantValue::Single(v) => vec![v],
            VariantValue::Multiple(v) => v,
        }
    }
}

/// A model reference with optional rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVariant {
    /// Model resource location (e.g., "block/stone" or "minecraft:block/stone").
    pub model: String,
    /// X rotation.
    #[serde(default, skip_serializing_if = "is_unrotated")]
    pub x: Rotation,
    /// Y rotation.
    #[serde(default, skip_serializing_if = "is_unrotated")]
    pub y: Rotation,
    /// If true, UV coordinates don't rotate with the block. Parsed, not applied.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub uvlock: bool,
    /// Weight for random selection. Only the first alternative is ever used.
    #[serde(default = "default_weight", skip_serializing_if = "is_default_weight")]
    pub weight: u32,
}

fn is_unrotated(rotation: &Rotation) -> bool {
    rotation.is_identity()
}

fn default_weight() -> u32 {
    1
}

fn is_default_weight(weight: &u32) -> bool {
    *weight == 1
}

impl ModelVariant {
    /// Unrotated reference to a model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            x: Rotation::Deg0,
            y: Rotation::Deg0,
            uvlock: false,
            weight: 1,
        }
    }

    pub fn with_rotation(mut self, x: Rotation, y: Rotation) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

/// A multipart case with optional condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipartCase {
    /// Condition for when this case applies.
    #[serde(default)]
    pub when: Option<MultipartCondition>,
    /// Model(s) to apply when condition is met.
    pub apply: ApplyValue,
}

/// The apply value can be a single model or array.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ApplyValue {
    Single(ModelVariant),
    Multiple(Vec<ModelVariant>),
}

impl ApplyValue {
    pub fn variants(&self) -> Vec<&ModelVariant> {
        match self {
            ApplyValue::Single(v) => vec![v],
            ApplyValue::Multiple(v) => v.iter().collect(),
        }
    }
}

/// A property value inside a multipart case. Packs write these as strings,
/// but bare booleans and numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PropertyValue(pub String);

impl PropertyValue {
    /// Alternatives of a `|`-delimited value, e.g. "north|south".
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.0.split('|')
    }

    pub fn admits(&self, value: &str) -> bool {
        self.alternatives().any(|alternative| alternative == value)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(PropertyValue(s)),
            serde_json::Value::Bool(b) => Ok(PropertyValue(b.to_string())),
            serde_json::Value::Number(n) => Ok(PropertyValue(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected a property value, found {other}"
            ))),
        }
    }
}

/// One set of `attribute: value|value|...` requirements.
pub type ConditionCase = BTreeMap<String, PropertyValue>;

/// Multipart condition for when a case applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultipartCondition {
    /// Any of the sub-conditions must match.
    Or {
        #[serde(rename = "OR")]
        or: Vec<ConditionCase>,
    },
    /// All of the sub-conditions must match. Parsed but never evaluated.
    And {
        #[serde(rename = "AND")]
        and: Vec<ConditionCase>,
    },
    /// Simple condition: all properties must match.
    Simple(ConditionCase),
}

impl MultipartCondition {
    /// The cases whose attributes take part in matching. `AND` conditions
    /// contribute none.
    pub fn cases(&self) -> &[ConditionCase] {
        match self {
            MultipartCondition::Or { or } => or,
            MultipartCondition::And { .. } => &[],
            MultipartCondition::Simple(case) => std::slice::from_ref(case),
        }
    }

    /// Check if the condition matches the given property assignment.
    /// `AND` conditions never match.
    pub fn matches(&self, properties: &BTreeMap<String, String>) -> bool {
        self.cases()
            .iter()
            .any(|case| Self::matches_case(case, properties))
    }

    /// Every attribute the case mentions must equal the assigned value.
    fn matches_case(case: &ConditionCase, properties: &BTreeMap<String, String>) -> bool {
        case.iter().all(|(key, expected)| {
            properties
                .get(key)
                .map(|value| expected.admits(value))
                .unwrap_or(false)
        })
    }
}

/// A blockstate after expansion: every state key maps to exactly one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedBlockstate {
    pub variants: BTreeMap<String, ModelVariant>,
}

impl NormalizedBlockstate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_simple_variants() {
        let json = r#"{
            "variants": {
                "": { "model": "block/stone" }
            }
        }"#;

        let def: BlockstateDefinition = serde_json::from_str(json).unwrap();
        match def {
            BlockstateDefinition::Variants(variants) => {
                assert!(variants.contains_key(""));
                assert_eq!(variants[""].len(), 1);
                assert_eq!(variants[""][0].model, "block/stone");
            }
            _ => panic!("Expected Variants"),
        }
    }

    #[test]
    fn test_parse_variants_with_rotation() {
        let json = r#"{
            "variants": {
                "facing=north": { "model": "block/furnace", "y": 0 },
                "facing=east": { "model": "block/furnace", "y": 90 },
                "facing=south": { "model": "block/furnace", "y": 180 },
                "facing=west": { "model": "block/furnace", "y": 270, "uvlock": true }
            }
        }"#;

        let def: BlockstateDefinition = serde_json::from_str(json).unwrap();
        match def {
            BlockstateDefinition::Variants(variants) => {
                assert_eq!(variants.len(), 4);
                assert_eq!(variants["facing=east"][0].y, Rotation::Deg90);
                assert!(variants["facing=west"][0].uvlock);
            }
            _ => panic!("Expected Variants"),
        }
    }

    #[test]
    fn test_parse_weighted_variants() {
        let json = r#"{
            "variants": {
                "": [
                    { "model": "block/stone", "weight": 10 },
                    { "model": "block/stone_mirrored", "weight": 5 }
                ]
            }
        }"#;

        let def: BlockstateDefinition = serde_json::from_str(json).unwrap();
        match def {
            BlockstateDefinition::Variants(variants) => {
                assert_eq!(variants[""].len(), 2);
                assert_eq!(variants[""][0].weight, 10);
                assert_eq!(variants[""][1].weight, 5);
            }
            _ => panic!("Expected Variants"),
        }
    }

    #[test]
    fn test_parse_multipart() {
        let json = r#"{
            "multipart": [
                { "apply": { "model": "block/fence_post" } },
                { "when": { "north": "true" }, "apply": { "model": "block/fence_side", "uvlock": true } },
                { "when": { "OR": [{ "east": "true" }, { "west": true }] }, "apply": [{ "model": "block/a" }] },
                { "when": { "AND": [{ "up": "true" }] }, "apply": { "model": "block/b" } }
            ]
        }"#;

        let def: BlockstateDefinition = serde_json::from_str(json).unwrap();
        match def {
            BlockstateDefinition::Multipart(cases) => {
                assert_eq!(cases.len(), 4);
                assert!(cases[0].when.is_none());
                assert!(matches!(cases[1].when, Some(MultipartCondition::Simple(_))));
                assert!(matches!(cases[2].when, Some(MultipartCondition::Or { .. })));
                assert!(matches!(cases[3].when, Some(MultipartCondition::And { .. })));
                assert_eq!(cases[2].apply.variants().len(), 1);
            }
            _ => panic!("Expected Multipart"),
        }
    }

    #[test]
    fn test_multipart_condition_simple() {
        let json = r#"{ "facing": "north", "lit": true }"#;
        let cond: MultipartCondition = serde_json::from_str(json).unwrap();

        assert!(cond.matches(&props(&[("facing", "north"), ("lit", "true")])));
        assert!(!cond.matches(&props(&[("facing", "south"), ("lit", "true")])));
        assert!(!cond.matches(&props(&[("facing", "north")])));
    }

    #[test]
    fn test_multipart_condition_or() {
        let json = r#"{ "OR": [{ "facing": "north" }, { "facing": "south" }] }"#;
        let cond: MultipartCondition = serde_json::from_str(json).unwrap();

        assert!(cond.matches(&props(&[("facing", "north")])));
        assert!(cond.matches(&props(&[("facing", "south")])));
        assert!(!cond.matches(&props(&[("facing", "east")])));
    }

    #[test]
    fn test_multipart_condition_pipe_values() {
        let json = r#"{ "facing": "north|south" }"#;
        let cond: MultipartCondition = serde_json::from_str(json).unwrap();

        assert!(cond.matches(&props(&[("facing", "north")])));
        assert!(cond.matches(&props(&[("facing", "south")])));
        assert!(!cond.matches(&props(&[("facing", "east")])));
    }

    #[test]
    fn test_multipart_condition_and_never_matches() {
        let json = r#"{ "AND": [{ "north": "true" }, { "south": "true" }] }"#;
        let cond: MultipartCondition = serde_json::from_str(json).unwrap();

        assert!(cond.cases().is_empty());
        assert!(!cond.matches(&props(&[("north", "true"), ("south", "true")])));
    }

    #[test]
    fn test_normalized_blockstate_serialization() {
        let mut state = NormalizedBlockstate::new();
        state.variants.insert(
            "facing=east".to_string(),
            ModelVariant::new("minecraft:block/furnace_generated_model_0"),
        );

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "variants": {
                    "facing=east": { "model": "minecraft:block/furnace_generated_model_0" }
                }
            })
        );
    }
}
