//! Block model parsing.
//!
//! Block models define the 3D geometry of blocks using cuboid elements.

use crate::types::{Direction, ElementRotation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Texture variable reserved for the block-breaking particle texture.
pub const PARTICLE: &str = "particle";

/// Maximum alias hops followed when resolving a texture variable.
const MAX_TEXTURE_CHAIN: usize = 16;

/// A parsed block model from models/block/*.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockModel {
    /// Parent model to inherit from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Whether to use ambient occlusion.
    #[serde(default = "default_ao", rename = "ambientocclusion")]
    pub ambient_occlusion: bool,

    /// Texture variable definitions: alias -> path or `#alias`.
    #[serde(default)]
    pub textures: BTreeMap<String, String>,

    /// Model elements (cuboids).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ModelElement>,

    /// Display transforms (item rendering only, passed through untouched).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<serde_json::Value>,
}

fn default_ao() -> bool {
    true
}

impl Default for BlockModel {
    fn default() -> Self {
        Self {
            parent: None,
            ambient_occlusion: default_ao(),
            textures: BTreeMap::new(),
            elements: Vec::new(),
            display: None,
        }
    }
}

/// A texture value as written in a model: either a concrete texture path
/// or a `#`-prefixed reference to another texture variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRef<'a> {
    Alias(&'a str),
    Path(&'a str),
}

impl<'a> TextureRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        match value.strip_prefix('#') {
            Some(alias) => TextureRef::Alias(alias),
            None => TextureRef::Path(value),
        }
    }
}

impl BlockModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this model has its own elements (not inherited).
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Resolve a texture reference (e.g., "#side") to a concrete texture path,
    /// following alias chains like #side -> #all -> block/stone.
    /// Returns None if a link is missing or the chain loops.
    pub fn resolve_texture<'a>(&'a self, reference: &'a str) -> Option<&'a str> {
        let mut current = reference;
        for _ in 0..MAX_TEXTURE_CHAIN {
            match TextureRef::parse(current) {
                TextureRef::Path(path) => return Some(path),
                TextureRef::Alias(alias) => current = self.textures.get(alias)?.as_str(),
            }
        }
        None
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Optional rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<ElementRotation>,
    /// Whether this element receives shade.
    #[serde(default = "default_shade")]
    pub shade: bool,
    /// Face definitions.
    #[serde(default)]
    pub faces: BTreeMap<Direction, ModelFace>,
}

fn default_shade() -> bool {
    true
}

impl ModelElement {
    /// UV rectangle the engine derives for a face without an explicit `uv`,
    /// projected from this element's box.
    pub fn default_uv(&self, face: Direction) -> [f32; 4] {
        let [x1, y1, z1] = self.from;
        let [x2, y2, z2] = self.to;
        match face {
            Direction::Down => [x1, 16.0 - z2, x2, 16.0 - z1],
            Direction::Up => [x1, z1, x2, z2],
            Direction::North => [16.0 - x2, 16.0 - y2, 16.0 - x1, 16.0 - y1],
            Direction::South => [x1, 16.0 - y2, x2, 16.0 - y1],
            Direction::West => [z1, 16.0 - y2, z2, 16.0 - y1],
            Direction::East => [16.0 - z2, 16.0 - y2, 16.0 - z1, 16.0 - y1],
        }
    }
}

/// A face of a model element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFace {
    /// UV coordinates [u1, v1, u2, v2] in 0-16 range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv: Option<[f32; 4]>,
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Face direction for culling (if adjacent block is opaque, hide this face).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cullface: Option<Direction>,
    /// UV rotation in degrees (0, 90, 180, 270).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: i32,
    /// Tint index for biome coloring (-1 = no tint).
    #[serde(default = "default_tint_index", skip_serializing_if = "is_untinted")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

fn is_untinted(value: &i32) -> bool {
    *value < 0
}

impl ModelFace {
    /// Create a face with the given texture reference and no other data.
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            uv: None,
            texture: texture.into(),
            cullface: None,
            rotation: 0,
            tintindex: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_model() {
        let json = r#"{
            "parent": "block/cube_all",
            "textures": {
                "all": "block/stone"
            }
        }"#;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.parent, Some("block/cube_all".to_string()));
        assert_eq!(model.textures.get("all"), Some(&"block/stone".to_string()));
        assert!(model.elements.is_empty());
        assert!(model.ambient_occlusion);
    }

    #[test]
    fn test_parse_model_with_elements() {
        let json = r##"{
            "textures": {
                "texture": "block/stone"
            },
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 16, 16],
                    "faces": {
                        "down":  { "texture": "#texture", "cullface": "down" },
                        "up":    { "texture": "#texture", "cullface": "up" },
                        "north": { "texture": "#texture", "cullface": "north" },
                        "south": { "texture": "#texture", "cullface": "south" },
                        "west":  { "texture": "#texture", "cullface": "west" },
                        "east":  { "texture": "#texture", "cullface": "east", "tintindex": 0 }
                    }
                }
            ]
        }"##;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.elements.len(), 1);

        let element = &model.elements[0];
        assert_eq!(element.from, [0.0, 0.0, 0.0]);
        assert_eq!(element.to, [16.0, 16.0, 16.0]);
        assert_eq!(element.faces.len(), 6);
        assert_eq!(
            element.faces.get(&Direction::Down).unwrap().cullface,
            Some(Direction::Down)
        );
        assert_eq!(element.faces[&Direction::East].tintindex, 0);
        assert_eq!(element.faces[&Direction::West].tintindex, -1);
    }

    #[test]
    fn test_parse_element_with_rotation() {
        let json = r#"{
            "from": [0, 0, 0],
            "to": [16, 16, 16],
            "rotation": {
                "origin": [8, 8, 8],
                "axis": "y",
                "angle": 45,
                "rescale": true
            },
            "faces": {}
        }"#;

        let element: ModelElement = serde_json::from_str(json).unwrap();
        let rotation = element.rotation.unwrap();
        assert_eq!(rotation.origin, [8.0, 8.0, 8.0]);
        assert_eq!(rotation.angle, 45.0);
        assert!(rotation.rescale);
    }

    #[test]
    fn test_default_matches_parsed_empty_model() {
        let parsed: BlockModel = serde_json::from_str("{}").unwrap();
        assert_eq!(BlockModel::new(), parsed);
        assert!(BlockModel::default().ambient_occlusion);
    }

    #[test]
    fn test_serialize_skips_defaults() {
        let mut model = BlockModel::new();
        model.textures.insert("all".to_string(), "block/stone".to_string());
        let value = serde_json::to_value(&model).unwrap();

        assert!(value.get("parent").is_none());
        assert!(value.get("elements").is_none());
        assert_eq!(value["ambientocclusion"], true);

        let face = serde_json::to_value(ModelFace::new("#all")).unwrap();
        assert_eq!(face, serde_json::json!({ "texture": "#all" }));
    }

    #[test]
    fn test_default_uv() {
        let element = ModelElement {
            from: [2.0, 0.0, 4.0],
            to: [14.0, 8.0, 12.0],
            rotation: None,
            shade: true,
            faces: BTreeMap::new(),
        };

        assert_eq!(element.default_uv(Direction::Up), [2.0, 4.0, 14.0, 12.0]);
        assert_eq!(element.default_uv(Direction::Down), [2.0, 4.0, 14.0, 12.0]);
        assert_eq!(element.default_uv(Direction::South), [2.0, 8.0, 14.0, 16.0]);
        assert_eq!(element.default_uv(Direction::North), [2.0, 8.0, 14.0, 16.0]);
        assert_eq!(element.default_uv(Direction::West), [4.0, 8.0, 12.0, 16.0]);
        assert_eq!(element.default_uv(Direction::East), [4.0, 8.0, 12.0, 16.0]);
    }

    #[test]
    fn test_resolve_texture() {
        let model = BlockModel {
            textures: [
                ("all".to_string(), "block/stone".to_string()),
                ("side".to_string(), "#all".to_string()),
                ("loop_a".to_string(), "#loop_b".to_string()),
                ("loop_b".to_string(), "#loop_a".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        assert_eq!(model.resolve_texture("#all"), Some("block/stone"));
        assert_eq!(model.resolve_texture("#side"), Some("block/stone"));
        assert_eq!(model.resolve_texture("block/dirt"), Some("block/dirt"));
        assert_eq!(model.resolve_texture("#missing"), None);
        assert_eq!(model.resolve_texture("#loop_a"), None);
    }
}
