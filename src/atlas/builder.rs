//! Texture atlas builder using greedy grid packing.
//!
//! The atlas is a grid of 16px cells. Textures are placed largest first, each
//! at the first free square block found while scanning outward from the
//! top-left corner one L-shaped shell at a time.

use super::{ChannelMap, Raster, Rect};
use crate::error::{GeneratorError, Result};
use crate::resource_pack::texture::{Texture, MIN_TEXTURE_SIZE};
use std::collections::BTreeMap;

/// Largest grid extent (in cells) a location word can address: x and y are
/// 10-bit fields.
pub const MAX_GRID_EXTENT: u32 = 1 << 10;

/// Placement of a texture in the atlas grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLocation {
    pub x: u32,
    pub y: u32,
    /// Side length in cells (a power of two).
    pub size: u32,
}

impl TextureLocation {
    /// Packed little-endian word: `log2(size) << 20 | y << 10 | x`.
    pub fn encode(&self) -> [u8; 4] {
        let size_class = self.size.max(1).trailing_zeros();
        let word = (size_class << 20) | (self.y << 10) | self.x;
        word.to_le_bytes()
    }

    /// Top-left pixel of this location.
    pub fn pixel_origin(&self) -> (u32, u32) {
        (self.x * MIN_TEXTURE_SIZE, self.y * MIN_TEXTURE_SIZE)
    }
}

/// A built texture atlas.
#[derive(Debug)]
pub struct TextureAtlas {
    /// Placement of every packed texture by name.
    pub locations: BTreeMap<String, TextureLocation>,
    /// Width of the packed bounding box in pixels.
    pub width: u32,
    /// Height of the packed bounding box in pixels.
    pub height: u32,
    /// Combined raster: albedo | normal on top, specular below.
    pub raster: Raster,
}

impl TextureAtlas {
    /// Create an empty atlas.
    pub fn empty() -> Self {
        Self {
            locations: BTreeMap::new(),
            width: 0,
            height: 0,
            raster: Raster::new(1, 1),
        }
    }

    /// Get the location of a texture.
    pub fn location(&self, name: &str) -> Option<&TextureLocation> {
        self.locations.get(name)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Export the atlas as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        self.raster.to_png()
    }
}

/// Occupancy of the cell grid.
struct OccupancyGrid {
    extent: u32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn new(extent: u32) -> Self {
        Self {
            extent,
            cells: vec![false; (extent * extent) as usize],
        }
    }

    fn is_free(&self, x: u32, y: u32, size: u32) -> bool {
        if x + size > self.extent || y + size > self.extent {
            return false;
        }
        (y..y + size).all(|cy| (x..x + size).all(|cx| !self.cells[(cy * self.extent + cx) as usize]))
    }

    fn occupy(&mut self, x: u32, y: u32, size: u32) {
        for cy in y..y + size {
            for cx in x..x + size {
                self.cells[(cy * self.extent + cx) as usize] = true;
            }
        }
    }

    /// First free `size` x `size` block, scanning shell `i` (cells with
    /// `max(x, y) == i`) rightwards along its bottom row, then up its right
    /// column.
    fn find_place(&mut self, size: u32) -> Option<TextureLocation> {
        for i in 0..self.extent {
            for j in 0..2 * i + 1 {
                let x = i.min(j);
                let y = i - j.saturating_sub(i);
                if self.is_free(x, y, size) {
                    self.occupy(x, y, size);
                    return Some(TextureLocation { x, y, size });
                }
            }
        }
        None
    }
}

/// Builder for creating texture atlases.
pub struct AtlasBuilder {
    max_atlas_size: u32,
    textures: BTreeMap<String, Texture>,
}

impl AtlasBuilder {
    /// Create a new atlas builder. `max_atlas_size` is the pixel extent of
    /// the packing grid.
    pub fn new(max_atlas_size: u32) -> Self {
        Self {
            max_atlas_size,
            textures: BTreeMap::new(),
        }
    }

    /// Add a texture to the atlas. Re-adding a name replaces it.
    pub fn add_texture(&mut self, name: impl Into<String>, texture: Texture) {
        self.textures.insert(name.into(), texture);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Grid extent in cells.
    fn extent(&self) -> u32 {
        (self.max_atlas_size / MIN_TEXTURE_SIZE).clamp(1, MAX_GRID_EXTENT)
    }

    /// Assign every texture a location, without rasterizing.
    pub fn pack(&self) -> Result<BTreeMap<String, TextureLocation>> {
        let extent = self.extent();
        let mut grid = OccupancyGrid::new(extent);

        // Largest first; ties keep name order.
        let mut order: Vec<(&String, &Texture)> = self.textures.iter().collect();
        order.sort_by(|a, b| b.1.size().cmp(&a.1.size()));

        let mut locations = BTreeMap::new();
        for (name, texture) in order {
            let cells = (texture.size() / MIN_TEXTURE_SIZE).max(1);
            let location = grid.find_place(cells).ok_or_else(|| GeneratorError::AtlasFull {
                texture: name.clone(),
                size: texture.size(),
                extent,
            })?;
            locations.insert(name.clone(), location);
        }

        Ok(locations)
    }

    /// Pack all textures and compose the combined raster.
    pub fn build(self) -> Result<TextureAtlas> {
        if self.textures.is_empty() {
            return Ok(TextureAtlas::empty());
        }

        let locations = self.pack()?;

        let (width, height) = locations.values().fold((0, 0), |(w, h), location| {
            (
                w.max((location.x + location.size) * MIN_TEXTURE_SIZE),
                h.max((location.y + location.size) * MIN_TEXTURE_SIZE),
            )
        });

        let mut raster = Raster::try_new(width * 2, height * 2)?;
        for (name, location) in &locations {
            let Some(texture) = self.textures.get(name) else {
                continue;
            };
            let (px, py) = location.pixel_origin();
            let size = texture.size();
            let rect = Rect::new(0, 0, size, size);

            raster.blit(&texture.albedo, rect, px, py, ChannelMap::IDENTITY);
            raster.blit(&texture.normal, rect, px + width, py, ChannelMap::IDENTITY);
            raster.blit(&texture.specular, rect, px, py + height, ChannelMap::IDENTITY);
        }

        tracing::debug!(
            "Packed {} textures into {}x{} ({}x{} raster)",
            locations.len(),
            width,
            height,
            raster.width,
            raster.height
        );

        Ok(TextureAtlas {
            locations,
            width,
            height,
            raster,
        })
    }
}
