//! Texture atlas building.
//!
//! This module packs every block texture into a grid of 16px cells and
//! composes the albedo, normal and specular maps into one raster.

mod builder;
mod raster;

pub use builder::{AtlasBuilder, TextureAtlas, TextureLocation, MAX_GRID_EXTENT};
pub use raster::{byte_len, ChannelMap, ChannelSource, Raster, Rect};
