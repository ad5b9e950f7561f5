//! In-memory RGBA8 raster with an explicit blit operation.

use crate::error::{GeneratorError, Result};
use image::ImageEncoder;

/// A rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Where a destination channel takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSource {
    Red,
    Green,
    Blue,
    Alpha,
    /// Constant 0.
    Zero,
    /// Constant 255.
    Full,
}

impl ChannelSource {
    fn pick(self, pixel: [u8; 4]) -> u8 {
        match self {
            ChannelSource::Red => pixel[0],
            ChannelSource::Green => pixel[1],
            ChannelSource::Blue => pixel[2],
            ChannelSource::Alpha => pixel[3],
            ChannelSource::Zero => 0,
            ChannelSource::Full => 255,
        }
    }
}

/// Per-channel remap applied while blitting (destination R, G, B, A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMap(pub [ChannelSource; 4]);

impl ChannelMap {
    /// Copy pixels unchanged.
    pub const IDENTITY: ChannelMap = ChannelMap([
        ChannelSource::Red,
        ChannelSource::Green,
        ChannelSource::Blue,
        ChannelSource::Alpha,
    ]);

    /// Specular map from the source alpha: green = alpha, opaque.
    pub const SPECULAR_FROM_ALPHA: ChannelMap = ChannelMap([
        ChannelSource::Zero,
        ChannelSource::Alpha,
        ChannelSource::Zero,
        ChannelSource::Full,
    ]);

    fn apply(&self, pixel: [u8; 4]) -> [u8; 4] {
        let [r, g, b, a] = self.0;
        [r.pick(pixel), g.pick(pixel), b.pick(pixel), a.pick(pixel)]
    }
}

/// An RGBA8 pixel buffer (4 bytes per pixel, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Byte length of a `width` x `height` RGBA8 buffer, if addressable.
pub fn byte_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| {
            GeneratorError::Export(format!("raster of {}x{} is too large", width, height))
        })
}

impl Raster {
    /// Create a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Create a fully transparent raster, failing instead of overflowing
    /// when the buffer cannot be addressed.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)?],
        })
    }

    /// Create a raster filled with one colour.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: color
                .iter()
                .copied()
                .cycle()
                .take(width as usize * height as usize * 4)
                .collect(),
        }
    }

    /// Wrap raw RGBA bytes.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if pixels.len() != expected {
            return Err(GeneratorError::Export(format!(
                "raster of {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode PNG (or any enabled image format) bytes into RGBA8.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(data)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Set a pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [u8; 4]) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[idx..idx + 4].copy_from_slice(&pixel);
    }

    /// Copy `src_rect` of `src` to (`dst_x`, `dst_y`) of this raster, remapping
    /// channels. The copy is clipped to both rasters' bounds.
    pub fn blit(&mut self, src: &Raster, src_rect: Rect, dst_x: u32, dst_y: u32, channels: ChannelMap) {
        let width = src_rect
            .width
            .min(src.width.saturating_sub(src_rect.x))
            .min(self.width.saturating_sub(dst_x));
        let height = src_rect
            .height
            .min(src.height.saturating_sub(src_rect.y))
            .min(self.height.saturating_sub(dst_y));

        for dy in 0..height {
            for dx in 0..width {
                let pixel = src.get_pixel(src_rect.x + dx, src_rect.y + dy);
                self.set_pixel(dst_x + dx, dst_y + dy, channels.apply(pixel));
            }
        }
    }

    /// Copy of the top-left `width` x `height` region.
    pub fn crop(&self, width: u32, height: u32) -> Raster {
        let mut cropped = Raster::new(width.min(self.width), height.min(self.height));
        let rect = Rect::new(0, 0, cropped.width, cropped.height);
        cropped.blit(self, rect, 0, 0, ChannelMap::IDENTITY);
        cropped
    }

    /// Nearest-neighbour resize.
    pub fn resized(&self, width: u32, height: u32) -> Raster {
        if self.width == width && self.height == height {
            return self.clone();
        }
        match image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone()) {
            Some(source) => {
                let resized = image::imageops::resize(
                    &source,
                    width,
                    height,
                    image::imageops::FilterType::Nearest,
                );
                Raster {
                    width,
                    height,
                    pixels: resized.into_raw(),
                }
            }
            None => Raster::new(width, height),
        }
    }

    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder
            .write_image(
                &self.pixels,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| GeneratorError::Export(format!("Failed to encode PNG: {}", e)))?;

        Ok(bytes)
    }
}
