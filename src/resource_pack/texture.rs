//! Texture loading and handling.
//!
//! Every block texture is loaded as a triple: albedo plus optional `_n`
//! (normal) and `_s` (specular) companions. Missing companions are replaced
//! by synthetic flat maps of the albedo's size.

use super::ResourcePack;
use crate::atlas::Raster;
use crate::error::{GeneratorError, Result};

/// Smallest texture the atlas packs, and its cell size.
pub const MIN_TEXTURE_SIZE: u32 = 16;

/// Suffix of normal map companions.
pub const NORMAL_SUFFIX: &str = "_n";
/// Suffix of specular map companions.
pub const SPECULAR_SUFFIX: &str = "_s";

/// Flat normal pointing out of the surface.
pub const FLAT_NORMAL: [u8; 4] = [127, 127, 255, 255];
/// Low, non-metallic specular.
pub const LOW_SPECULAR: [u8; 4] = [0, 10, 0, 255];

/// A block texture with its companion maps, all `size` x `size`.
#[derive(Debug, Clone)]
pub struct Texture {
    pub albedo: Raster,
    pub normal: Raster,
    pub specular: Raster,
}

impl Texture {
    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.albedo.width
    }

    /// Build a texture from an albedo, filling absent companions with the
    /// given colours.
    pub fn with_fallbacks(
        albedo: Raster,
        normal: Option<Raster>,
        specular: Option<Raster>,
        flat_normal: [u8; 4],
        default_specular: [u8; 4],
    ) -> Self {
        let size = albedo.width;
        let normal = normal
            .map(|n| n.resized(size, size))
            .unwrap_or_else(|| Raster::filled(size, size, flat_normal));
        let specular = specular
            .map(|s| s.resized(size, size))
            .unwrap_or_else(|| Raster::filled(size, size, default_specular));
        Self {
            albedo,
            normal,
            specular,
        }
    }
}

/// Colours used for synthetic companion maps.
#[derive(Debug, Clone, Copy)]
pub struct CompanionDefaults {
    pub flat_normal: [u8; 4],
    pub specular: [u8; 4],
}

impl Default for CompanionDefaults {
    fn default() -> Self {
        Self {
            flat_normal: FLAT_NORMAL,
            specular: LOW_SPECULAR,
        }
    }
}

/// Check whether a texture name is a normal/specular companion of another
/// texture present in the pack.
pub fn is_companion(name: &str, pack: &ResourcePack) -> bool {
    [NORMAL_SUFFIX, SPECULAR_SUFFIX].iter().any(|suffix| {
        name.strip_suffix(suffix)
            .map(|base| pack.textures.contains_key(base))
            .unwrap_or(false)
    })
}

/// Decode a texture image, keeping only the first frame of an animation
/// strip (texture taller than wide, height a multiple of width).
pub fn decode_texture(data: &[u8]) -> Result<Raster> {
    let raster = Raster::decode(data)?;
    let is_animated = raster.height > raster.width
        && raster.width > 0
        && raster.height % raster.width == 0;
    if is_animated {
        Ok(raster.crop(raster.width, raster.width))
    } else {
        Ok(raster)
    }
}

/// Load a block texture and its companions from the pack.
pub fn load_texture(pack: &ResourcePack, name: &str, defaults: CompanionDefaults) -> Result<Texture> {
    let data = pack
        .get_texture(name)
        .ok_or_else(|| GeneratorError::ResourceNotFound(format!("texture {}", name)))?;
    let albedo = decode_texture(data)?;
    validate_size(name, &albedo)?;

    let normal = load_companion(pack, name, NORMAL_SUFFIX);
    let specular = load_companion(pack, name, SPECULAR_SUFFIX);

    Ok(Texture::with_fallbacks(
        albedo,
        normal,
        specular,
        defaults.flat_normal,
        defaults.specular,
    ))
}

fn load_companion(pack: &ResourcePack, name: &str, suffix: &str) -> Option<Raster> {
    let companion = format!("{}{}", name, suffix);
    let data = pack.get_texture(&companion)?;
    match decode_texture(data) {
        Ok(raster) => Some(raster),
        Err(e) => {
            tracing::debug!("Ignoring undecodable companion {}: {}", companion, e);
            None
        }
    }
}

/// Atlas tiles must be square, a power of two, and at least one cell wide.
fn validate_size(name: &str, raster: &Raster) -> Result<()> {
    let reason = if raster.width != raster.height {
        Some(format!("not square ({}x{})", raster.width, raster.height))
    } else if raster.width < MIN_TEXTURE_SIZE {
        Some(format!("smaller than {}px", MIN_TEXTURE_SIZE))
    } else if !raster.width.is_power_of_two() {
        Some(format!("size {} is not a power of two", raster.width))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(GeneratorError::InvalidTexture {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
