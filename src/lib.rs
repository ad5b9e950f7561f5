//! # VPT Generator
//!
//! Bakes Minecraft block geometry and texture placement into lookup
//! textures of a repackaged resource pack, for shaders that rebuild block
//! surfaces themselves.
//!
//! ## Overview
//!
//! This library takes the vanilla client jar and a resource pack as input.
//! Every blockstate is expanded so each state key points at exactly one
//! generated model; all block textures are packed into one atlas; each
//! generated model's elements are encoded into a row of a geometry texture;
//! and every generated model gets a marker element whose texture names its
//! row. The output is a single `VPT_<name>.zip`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vpt_generator::{Generator, GeneratorInput, NoProgress};
//!
//! let input = GeneratorInput::from_paths("client.jar", "MyPack.zip")?;
//! let output = Generator::new().generate(&input, &mut NoProgress)?;
//! std::fs::write(&output.file_name, &output.data)?;
//! ```
//!
//! ## Progress
//!
//! Any `FnMut(Stage, f32)` closure can observe the run:
//!
//! ```ignore
//! let output = Generator::new().generate(&input, &mut |stage: Stage, fraction: f32| {
//!     println!("{stage}: {:.0}%", fraction * 100.0);
//! })?;
//! ```

pub mod error;
pub mod types;
pub mod resource_pack;
pub mod resolver;
pub mod expander;
pub mod atlas;
pub mod export;
pub mod pipeline;

// Re-export main types for convenience
pub use error::{GeneratorError, Result};
pub use types::{Axis, BlockTransform, Direction, Rotation};
pub use resource_pack::{BlockModel, BlockstateDefinition, ModelElement, ResourcePack};
pub use atlas::TextureAtlas;
pub use pipeline::{
    GeneratedPack, GenerationStats, Generator, GeneratorConfig, GeneratorInput, NoProgress,
    ProgressSink, Stage,
};

/// Load a resource pack from a file path (ZIP or directory).
pub fn load_resource_pack<P: AsRef<std::path::Path>>(path: P) -> Result<ResourcePack> {
    resource_pack::loader::load_from_path(path)
}

/// Load a resource pack from ZIP bytes (for WASM compatibility).
pub fn load_resource_pack_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    resource_pack::loader::load_from_bytes(data)
}

/// Load the jar and lay the resource pack over it, both given as ZIP bytes.
pub fn load_layered_from_bytes(jar: &[u8], resourcepack: &[u8]) -> Result<ResourcePack> {
    resource_pack::loader::load_layered(jar, resourcepack)
}

#[cfg(feature = "wasm")]
pub mod wasm;
