//! Output generation.
//!
//! This module encodes model geometry, builds the lookup textures, derives
//! the optional skin, and writes the output archive.

pub mod archive;
pub mod data_texture;
pub mod geometry;
pub mod skin;

pub use archive::PackWriter;
pub use data_texture::{geometry_texture, marker_texture};
pub use geometry::{encode_model, ELEMENT_RECORD_LEN};
pub use skin::derive_skin;
