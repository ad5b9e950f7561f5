//! The generation pipeline.
//!
//! A run expands every blockstate into generated models, normalizes them,
//! packs all block textures into the atlas, encodes each generated model's
//! geometry into one row of the geometry texture, tags every model with a
//! marker pointing at its row, and writes the output archive.

mod context;
pub mod normalize;
mod progress;

pub use context::PipelineContext;
pub use normalize::{disable_shading, inject_marker, marker_texture_name, simplify};
pub use progress::{NoProgress, ProgressSink, Stage};

use crate::atlas::AtlasBuilder;
use crate::error::{GeneratorError, Result};
use crate::expander::expand_blockstate;
use crate::export::{archive, encode_model, geometry_texture, marker_texture, skin, PackWriter};
use crate::resolver::ModelResolver;
use crate::resource_pack::texture::{load_texture, CompanionDefaults, FLAT_NORMAL, LOW_SPECULAR};
use crate::resource_pack::{loader, PackMetadata, ResourcePack};
use std::path::Path;

/// Generator configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Pixel extent of the atlas packing grid.
    pub max_atlas_size: u32,
    /// Output pack description, followed by the resourcepack name.
    pub description_prefix: String,
    /// Output archive name, followed by the resourcepack name.
    pub output_prefix: String,
    /// Pack format used when no input has a readable `pack.mcmeta`.
    pub fallback_pack_format: u64,
    /// Left half of every marker texture.
    pub marker_color: [u8; 4],
    /// Normal map colour for textures without a `_n` companion.
    pub flat_normal: [u8; 4],
    /// Specular colour for textures without a `_s` companion.
    pub default_specular: [u8; 4],
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_atlas_size: 16384,
            description_prefix: "VanillaPuddingTart - ".to_string(),
            output_prefix: "VPT_".to_string(),
            fallback_pack_format: 15,
            marker_color: [255, 0, 255, 255],
            flat_normal: FLAT_NORMAL,
            default_specular: LOW_SPECULAR,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_atlas_size(mut self, max_atlas_size: u32) -> Self {
        self.max_atlas_size = max_atlas_size;
        self
    }

    pub fn with_description_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.description_prefix = prefix.into();
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn with_fallback_pack_format(mut self, pack_format: u64) -> Self {
        self.fallback_pack_format = pack_format;
        self
    }

    pub fn with_marker_color(mut self, color: [u8; 4]) -> Self {
        self.marker_color = color;
        self
    }

    pub fn with_companion_colors(mut self, flat_normal: [u8; 4], specular: [u8; 4]) -> Self {
        self.flat_normal = flat_normal;
        self.default_specular = specular;
        self
    }

    fn companion_defaults(&self) -> CompanionDefaults {
        CompanionDefaults {
            flat_normal: self.flat_normal,
            specular: self.default_specular,
        }
    }
}

/// What a run consumes: the layered assets, the resourcepack's name, and an
/// optional player skin.
#[derive(Debug, Clone)]
pub struct GeneratorInput {
    pub pack: ResourcePack,
    /// Resourcepack base name, without `.zip`.
    pub name: String,
    /// Encoded skin image.
    pub skin: Option<Vec<u8>>,
}

impl GeneratorInput {
    pub fn new(pack: ResourcePack, name: impl Into<String>) -> Self {
        Self {
            pack,
            name: name.into(),
            skin: None,
        }
    }

    /// Layer a resourcepack ZIP over a jar ZIP.
    pub fn from_bytes(jar: &[u8], resourcepack: &[u8], name: &str) -> Result<Self> {
        let pack = loader::load_layered(jar, resourcepack)?;
        Ok(Self::new(pack, pack_base_name(name)))
    }

    /// Layer a resourcepack over a jar, each a ZIP file or a directory.
    /// The resourcepack's file name names the output.
    pub fn from_paths(jar: impl AsRef<Path>, resourcepack: impl AsRef<Path>) -> Result<Self> {
        let resourcepack = resourcepack.as_ref();
        let name = resourcepack
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                GeneratorError::InvalidResourcePack(format!(
                    "no file name in {}",
                    resourcepack.display()
                ))
            })?;

        let mut pack = loader::load_from_path(jar)?;
        pack.overlay(loader::load_from_path(resourcepack)?);
        Ok(Self::new(pack, pack_base_name(&name)))
    }

    pub fn with_skin(mut self, skin: Vec<u8>) -> Self {
        self.skin = Some(skin);
        self
    }
}

/// Strip a trailing `.zip` from a resourcepack file name.
pub fn pack_base_name(file_name: &str) -> &str {
    file_name.strip_suffix(".zip").unwrap_or(file_name)
}

/// Output archive name for a resourcepack.
pub fn output_file_name(prefix: &str, name: &str) -> String {
    format!("{}{}.zip", prefix, name)
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub blockstates: usize,
    pub generated_models: usize,
    pub atlas_textures: usize,
    pub skipped_textures: usize,
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub archive_entries: usize,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct GeneratedPack {
    /// Suggested archive file name, e.g. `VPT_MyPack.zip`.
    pub file_name: String,
    /// Archive bytes.
    pub data: Vec<u8>,
    pub stats: GenerationStats,
}

/// Runs the pipeline.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a new generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Create a new generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the output archive. Any fatal error aborts the whole run.
    pub fn generate(
        &self,
        input: &GeneratorInput,
        progress: &mut dyn ProgressSink,
    ) -> Result<GeneratedPack> {
        progress.report(Stage::Loading, 1.0);
        let mut ctx = PipelineContext::new(&input.pack, &self.config);

        expand_blockstates(&mut ctx, progress);
        normalize_models(&mut ctx, progress);
        pack_atlas(&mut ctx, progress)?;
        encode_geometry(&mut ctx, progress);
        inject_markers(&mut ctx);
        let data = write_archive(&mut ctx, &input.name, input.skin.as_deref(), progress)?;

        progress.report(Stage::Done, 1.0);
        tracing::info!(
            "Generated {} models for {} blockstates, {} atlas textures",
            ctx.stats.generated_models,
            ctx.stats.blockstates,
            ctx.stats.atlas_textures
        );

        Ok(GeneratedPack {
            file_name: output_file_name(&self.config.output_prefix, &input.name),
            data,
            stats: ctx.stats,
        })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand every blockstate, collecting generated models.
pub fn expand_blockstates(ctx: &mut PipelineContext, progress: &mut dyn ProgressSink) {
    let resolver = ModelResolver::new(ctx.pack);
    let total = ctx.pack.blockstates.len();

    for (i, (name, definition)) in ctx.pack.blockstates.iter().enumerate() {
        let normalized = expand_blockstate(name, definition, &resolver, &mut ctx.generated);
        ctx.blockstates.insert(name.clone(), normalized);
        progress.report_items(Stage::ExpandingBlockstates, i + 1, total);
    }

    ctx.stats.blockstates = ctx.blockstates.len();
    ctx.stats.generated_models = ctx.generated.len();
    tracing::info!(
        "Expanded {} blockstates into {} models",
        ctx.stats.blockstates,
        ctx.stats.generated_models
    );
}

/// Simplify texture tables and switch off shading on every generated model.
pub fn normalize_models(ctx: &mut PipelineContext, progress: &mut dyn ProgressSink) {
    let total = ctx.generated.len();
    for (i, model) in ctx.generated.values_mut().enumerate() {
        simplify(model);
        disable_shading(model);
        progress.report_items(Stage::NormalizingModels, i + 1, total);
    }
}

/// Load every block texture with its companions and pack the atlas.
/// Textures that fail to load are skipped; a full atlas is fatal.
pub fn pack_atlas(ctx: &mut PipelineContext, progress: &mut dyn ProgressSink) -> Result<()> {
    let names = ctx.pack.block_texture_names();
    let total = names.len();
    let defaults = ctx.config.companion_defaults();
    let mut builder = AtlasBuilder::new(ctx.config.max_atlas_size);

    for (i, name) in names.into_iter().enumerate() {
        match load_texture(ctx.pack, name, defaults) {
            Ok(texture) => builder.add_texture(name, texture),
            Err(e) => {
                tracing::warn!("Skipping texture {}: {}", name, e);
                ctx.stats.skipped_textures += 1;
            }
        }
        progress.report_items(Stage::LoadingTextures, i + 1, total);
    }

    ctx.atlas = builder.build()?;
    ctx.stats.atlas_textures = ctx.atlas.len();
    ctx.stats.atlas_width = ctx.atlas.raster.width;
    ctx.stats.atlas_height = ctx.atlas.raster.height;
    progress.report(Stage::PackingAtlas, 1.0);

    tracing::info!(
        "Packed {} textures ({} skipped) into a {}x{} atlas",
        ctx.stats.atlas_textures,
        ctx.stats.skipped_textures,
        ctx.stats.atlas_width,
        ctx.stats.atlas_height
    );
    Ok(())
}

/// Encode each generated model into its geometry row, in name order.
pub fn encode_geometry(ctx: &mut PipelineContext, progress: &mut dyn ProgressSink) {
    let total = ctx.generated.len();
    ctx.geometry_rows = ctx
        .generated
        .values()
        .enumerate()
        .map(|(i, model)| {
            let row = encode_model(model, &ctx.atlas);
            progress.report_items(Stage::EncodingGeometry, i + 1, total);
            row
        })
        .collect();
}

/// Append the marker element to every generated model. Must run after
/// encoding so the marker itself is not part of the geometry rows.
pub fn inject_markers(ctx: &mut PipelineContext) {
    for (name, model) in ctx.generated.iter_mut() {
        inject_marker(model, name);
    }
}

/// Write every output entry and return the archive bytes.
pub fn write_archive(
    ctx: &mut PipelineContext,
    name: &str,
    skin_data: Option<&[u8]>,
    progress: &mut dyn ProgressSink,
) -> Result<Vec<u8>> {
    let mut writer = PackWriter::new();
    let config = ctx.config;

    let metadata = ctx
        .pack
        .metadata
        .clone()
        .unwrap_or_else(|| PackMetadata::with_format(config.fallback_pack_format))
        .with_description(&format!("{}{}", config.description_prefix, name));
    writer.add_json(archive::PACK_METADATA_PATH, &metadata.0)?;

    let total = ctx.blockstates.len() + ctx.generated.len();
    let mut done = 0;

    for (block_id, blockstate) in &ctx.blockstates {
        writer.add_json(&archive::blockstate_path(block_id), blockstate)?;
        done += 1;
        progress.report_items(Stage::WritingArchive, done, total);
    }

    for (index, (model_name, model)) in ctx.generated.iter().enumerate() {
        writer.add_json(&archive::model_path(model_name), model)?;

        let marker = marker_texture(index as u32, config.marker_color);
        writer.add_png(
            &archive::block_texture_path(&marker_texture_name(model_name)),
            &marker,
        )?;
        done += 1;
        progress.report_items(Stage::WritingArchive, done, total);
    }

    writer.add_bytes(archive::ATLAS_PATH, &ctx.atlas.to_png()?)?;
    writer.add_png(archive::GEOMETRY_PATH, &geometry_texture(&ctx.geometry_rows)?)?;

    if let Some(data) = skin_data {
        let derived = skin::derive_skin(data)?;
        writer.add_png(archive::SKIN_PATH, &derived)?;
    }

    ctx.stats.archive_entries = writer.entry_count();
    writer.finish()
}
