//! VPT Generator CLI
//!
//! Repackage a resource pack with baked geometry lookup textures.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use vpt_generator::{Generator, GeneratorConfig, GeneratorInput, ResourcePack, Stage};

#[derive(Parser)]
#[command(name = "vpt-generator")]
#[command(author, version, about = "Bake block geometry into a repackaged Minecraft resource pack", long_about = None)]
struct Cli {
    /// Log per-item detail
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the output pack
    Generate {
        /// Path to the Minecraft client jar (ZIP or unpacked directory)
        #[arg(short, long)]
        jar: PathBuf,

        /// Path to the resource pack (ZIP or directory)
        #[arg(short, long)]
        resource_pack: PathBuf,

        /// Directory the output archive is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Player skin PNG to derive the skin texture from
        #[arg(short, long)]
        skin: Option<PathBuf>,

        /// Maximum atlas size in pixels
        #[arg(long, default_value = "16384")]
        atlas_size: u32,

        /// Pack format used when neither input has a pack.mcmeta
        #[arg(long, default_value = "15")]
        pack_format: u64,

        /// Output archive name prefix
        #[arg(long, default_value = "VPT_")]
        prefix: String,
    },

    /// Show information about the layered input
    Info {
        /// Path to the Minecraft client jar (ZIP or directory)
        #[arg(short, long)]
        jar: PathBuf,

        /// Path to the resource pack (ZIP or directory)
        #[arg(short, long)]
        resource_pack: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .without_time()
        .compact()
        .init();

    match cli.command {
        Commands::Generate {
            jar,
            resource_pack,
            output,
            skin,
            atlas_size,
            pack_format,
            prefix,
        } => {
            let config = GeneratorConfig::default()
                .with_max_atlas_size(atlas_size)
                .with_fallback_pack_format(pack_format)
                .with_output_prefix(prefix);
            generate(&jar, &resource_pack, &output, skin.as_deref(), config)?;
        }
        Commands::Info { jar, resource_pack } => {
            show_pack_info(&jar, resource_pack.as_deref())?;
        }
    }

    Ok(())
}

fn generate(
    jar: &Path,
    resource_pack: &Path,
    output_dir: &Path,
    skin: Option<&Path>,
    config: GeneratorConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading {:?} over {:?}...", resource_pack, jar);
    let mut input = GeneratorInput::from_paths(jar, resource_pack)?;
    if let Some(skin_path) = skin {
        input = input.with_skin(fs::read(skin_path)?);
    }

    println!("Generating with config:");
    println!("  - Atlas max size: {}", config.max_atlas_size);
    println!("  - Fallback pack format: {}", config.fallback_pack_format);

    let generator = Generator::with_config(config);
    let mut last_stage = None;
    let output = generator.generate(&input, &mut |stage: Stage, _fraction: f32| {
        if last_stage != Some(stage) {
            println!("  {}", stage);
            last_stage = Some(stage);
        }
    })?;

    let stats = &output.stats;
    println!(
        "  Generated {} models for {} blockstates",
        stats.generated_models, stats.blockstates
    );
    println!(
        "  Atlas: {}x{} with {} textures ({} skipped)",
        stats.atlas_width, stats.atlas_height, stats.atlas_textures, stats.skipped_textures
    );

    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(&output.file_name);
    fs::write(&path, &output.data)?;
    println!(
        "Wrote {} entries ({} bytes) to {:?}",
        stats.archive_entries,
        output.data.len(),
        path
    );

    Ok(())
}

fn show_pack_info(
    jar: &Path,
    resource_pack: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading {:?}...", jar);
    let mut pack: ResourcePack = vpt_generator::load_resource_pack(jar)?;
    if let Some(path) = resource_pack {
        println!("Layering {:?}...", path);
        pack.overlay(vpt_generator::load_resource_pack(path)?);
    }

    println!("\nResource Pack Info:");
    if let Some(format) = pack.metadata.as_ref().and_then(|m| m.pack_format()) {
        println!("  Pack format: {}", format);
    }
    println!("  Blockstates: {}", pack.blockstate_count());
    println!("  Models: {}", pack.model_count());
    println!("  Textures: {}", pack.texture_count());
    println!("  Block textures: {}", pack.block_texture_names().len());

    Ok(())
}
