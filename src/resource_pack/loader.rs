//! Resource pack loading from ZIP files and directories.

use super::{BlockModel, BlockstateDefinition, PackMetadata, ResourcePack};
use crate::error::{GeneratorError, Result};
use std::io::Read;
use std::path::Path;

/// Namespace whose assets take part in generation.
const NAMESPACE: &str = "minecraft";

/// A recognised archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEntry {
    /// `pack.mcmeta` at the archive root.
    PackMetadata,
    /// `assets/minecraft/blockstates/<id>.json`
    Blockstate(String),
    /// `assets/minecraft/models/block/<path>.json`
    Model(String),
    /// `assets/minecraft/textures/block/<path>.png`
    Texture(String),
}

/// Classify an archive path. Anything outside the fixed folder scheme is `None`.
pub fn classify_path(file_path: &str) -> Option<AssetEntry> {
    if file_path == "pack.mcmeta" {
        return Some(AssetEntry::PackMetadata);
    }

    let (namespace, asset_type, asset_path) = parse_asset_path(file_path)?;
    if namespace != NAMESPACE {
        return None;
    }

    match asset_type {
        "blockstates" => asset_path
            .strip_suffix(".json")
            .filter(|id| !id.contains('/'))
            .map(|id| AssetEntry::Blockstate(id.to_string())),
        "models" => asset_path
            .strip_prefix("block/")
            .and_then(|p| p.strip_suffix(".json"))
            .map(|p| AssetEntry::Model(p.to_string())),
        "textures" => asset_path
            .strip_prefix("block/")
            .and_then(|p| p.strip_suffix(".png"))
            .map(|p| AssetEntry::Texture(p.to_string())),
        _ => None,
    }
}

/// Parse an asset path from a ZIP file.
/// Returns (namespace, asset_type, asset_path) if valid.
fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Parse one recognised entry into the pack. Unparsable documents are
/// skipped with a warning.
fn ingest(pack: &mut ResourcePack, entry: AssetEntry, data: Vec<u8>) {
    match entry {
        AssetEntry::PackMetadata => {
            match std::str::from_utf8(&data).map_err(|e| e.to_string()).and_then(|s| {
                PackMetadata::parse(s.trim_start_matches('\u{feff}')).map_err(|e| e.to_string())
            }) {
                Ok(metadata) => pack.metadata = Some(metadata),
                Err(e) => tracing::warn!("Failed to parse pack.mcmeta: {}", e),
            }
        }
        AssetEntry::Blockstate(block_id) => {
            match serde_json::from_slice::<BlockstateDefinition>(&data) {
                Ok(def) => pack.add_blockstate(&block_id, def),
                Err(e) => tracing::warn!("Failed to parse blockstate {}: {}", block_id, e),
            }
        }
        AssetEntry::Model(model_path) => match serde_json::from_slice::<BlockModel>(&data) {
            Ok(model) => pack.add_model(&model_path, model),
            Err(e) => tracing::warn!("Failed to parse model {}: {}", model_path, e),
        },
        AssetEntry::Texture(texture_path) => pack.add_texture(&texture_path, data),
    }
}

/// Load a resource pack from a file path.
///
/// Supports both ZIP files (including client jars) and directories.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ResourcePack> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)
    }
}

/// Load a resource pack from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut pack = ResourcePack::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let Some(entry) = classify_path(file.name()) else {
            continue;
        };

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        ingest(&mut pack, entry, contents);
    }

    tracing::debug!(
        "Loaded archive: {} blockstates, {} models, {} textures",
        pack.blockstate_count(),
        pack.model_count(),
        pack.texture_count()
    );

    Ok(pack)
}

/// Load the base jar and lay the resourcepack over it.
pub fn load_layered(jar: &[u8], resourcepack: &[u8]) -> Result<ResourcePack> {
    let mut pack = load_from_bytes(jar)?;
    pack.overlay(load_from_bytes(resourcepack)?);
    Ok(pack)
}

/// Load a resource pack from a directory.
fn load_from_directory(path: &Path) -> Result<ResourcePack> {
    if !path.join("assets").exists() {
        return Err(GeneratorError::InvalidResourcePack(
            "No assets directory found".to_string(),
        ));
    }

    let mut pack = ResourcePack::new();
    load_files_recursive(path, path, &mut pack)?;
    Ok(pack)
}

/// Walk a directory, ingesting every file whose relative path is recognised.
fn load_files_recursive(base: &Path, dir: &Path, pack: &mut ResourcePack) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            load_files_recursive(base, &path, pack)?;
            continue;
        }

        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");

        if let Some(asset) = classify_path(&relative) {
            let data = std::fs::read(&path)?;
            ingest(pack, asset, data);
        }
    }
    Ok(())
}
