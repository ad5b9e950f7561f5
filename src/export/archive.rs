//! Output archive writer.

use crate::atlas::Raster;
use crate::error::{GeneratorError, Result};
use serde::Serialize;
use std::io::Write;

pub const PACK_METADATA_PATH: &str = "pack.mcmeta";
pub const ATLAS_PATH: &str = "assets/minecraft/textures/effect/atlas.png";
pub const GEOMETRY_PATH: &str = "assets/minecraft/textures/effect/geometry.png";
pub const SKIN_PATH: &str = "assets/minecraft/textures/effect/skin.png";

/// Archive path of a blockstate document.
pub fn blockstate_path(name: &str) -> String {
    format!("assets/minecraft/blockstates/{}.json", name)
}

/// Archive path of a model document.
pub fn model_path(name: &str) -> String {
    format!("assets/minecraft/models/block/{}.json", name)
}

/// Archive path of a block texture.
pub fn block_texture_path(name: &str) -> String {
    format!("assets/minecraft/textures/block/{}.png", name)
}

/// Writes entries into an in-memory deflated ZIP.
pub struct PackWriter {
    zip: zip::ZipWriter<std::io::Cursor<Vec<u8>>>,
    options: zip::write::SimpleFileOptions,
    entries: usize,
}

impl PackWriter {
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(std::io::Cursor::new(Vec::new())),
            options: zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
            entries: 0,
        }
    }

    /// Add raw bytes.
    pub fn add_bytes(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.zip
            .start_file(path, self.options)
            .map_err(|e| GeneratorError::Export(format!("Failed to start {}: {}", path, e)))?;
        self.zip.write_all(data)?;
        self.entries += 1;
        Ok(())
    }

    /// Add a JSON document.
    pub fn add_json<T: Serialize + ?Sized>(&mut self, path: &str, value: &T) -> Result<()> {
        let json = serde_json::to_vec(value)?;
        self.add_bytes(path, &json)
    }

    /// Add a raster as PNG.
    pub fn add_png(&mut self, path: &str, raster: &Raster) -> Result<()> {
        let png = raster.to_png()?;
        self.add_bytes(path, &png)
    }

    /// Number of entries written so far.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PackWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_pack_writer() {
        let mut writer = PackWriter::new();
        writer
            .add_json(PACK_METADATA_PATH, &serde_json::json!({ "pack": { "pack_format": 15 } }))
            .unwrap();
        writer
            .add_png(ATLAS_PATH, &Raster::filled(2, 2, [1, 2, 3, 4]))
            .unwrap();
        assert_eq!(writer.entry_count(), 2);

        let bytes = writer.finish().unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut file = archive.by_name(PACK_METADATA_PATH).unwrap();
        assert_eq!(file.compression(), zip::CompressionMethod::Deflated);
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["pack"]["pack_format"], 15);
        drop(file);

        let mut file = archive.by_name(ATLAS_PATH).unwrap();
        let mut png = Vec::new();
        file.read_to_end(&mut png).unwrap();
        assert_eq!(Raster::decode(&png).unwrap().get_pixel(1, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_entry_paths() {
        assert_eq!(blockstate_path("stone"), "assets/minecraft/blockstates/stone.json");
        assert_eq!(
            model_path("stone_generated_model_0"),
            "assets/minecraft/models/block/stone_generated_model_0.json"
        );
        assert_eq!(
            block_texture_path("stone_generated_model_0_data"),
            "assets/minecraft/textures/block/stone_generated_model_0_data.png"
        );
    }
}
