//! Lookup textures read by the external renderer.

use crate::atlas::{byte_len, ChannelMap, Raster, Rect};
use crate::error::Result;

/// Side length of a per-model marker texture.
pub const MARKER_TEXTURE_SIZE: u32 = 16;

/// Pack encoded model rows into one image, one pixel row per model.
///
/// Rows are zero-padded to the longest row. The image is at least 1x1.
pub fn geometry_texture(rows: &[Vec<u8>]) -> Result<Raster> {
    let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let width = (longest.div_ceil(4) as u32).max(1);
    let height = (rows.len() as u32).max(1);

    let mut pixels = vec![0u8; byte_len(width, height)?];
    let stride = width as usize * 4;
    for (y, row) in rows.iter().enumerate() {
        let start = y * stride;
        pixels[start..start + row.len()].copy_from_slice(row);
    }

    Raster::from_raw(width, height, pixels)
}

/// Marker texture of the model at geometry row `index`: the left half is
/// the sentinel colour, the right half holds the row index as a
/// little-endian byte triple.
pub fn marker_texture(index: u32, marker_color: [u8; 4]) -> Raster {
    let size = MARKER_TEXTURE_SIZE;
    let half = size / 2;
    let index_color = [
        (index & 0xFF) as u8,
        ((index >> 8) & 0xFF) as u8,
        ((index >> 16) & 0xFF) as u8,
        255,
    ];

    let mut raster = Raster::filled(size, size, marker_color);
    let right = Raster::filled(half, size, index_color);
    raster.blit(&right, Rect::new(0, 0, half, size), half, 0, ChannelMap::IDENTITY);
    raster
}
