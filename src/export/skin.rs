//! Derived player skin texture.

use crate::atlas::{ChannelMap, Raster, Rect};
use crate::error::Result;

/// Build the derived skin from encoded skin image bytes: the skin itself on
/// the left, its alpha channel as a specular map on the right.
pub fn derive_skin(data: &[u8]) -> Result<Raster> {
    let skin = Raster::decode(data)?;
    Ok(derive_skin_raster(&skin))
}

pub fn derive_skin_raster(skin: &Raster) -> Raster {
    let (width, height) = (skin.width, skin.height);
    let rect = Rect::new(0, 0, width, height);

    let mut derived = Raster::new(width * 2, height);
    derived.blit(skin, rect, 0, 0, ChannelMap::IDENTITY);
    derived.blit(skin, rect, width, 0, ChannelMap::SPECULAR_FROM_ALPHA);
    derived
}
