//! Patch Atlas CLI
//!
//! Pack texture patches described by a JSON manifest into one atlas.

use clap::{Args, Parser, Subcommand, ValueEnum};
use patch_atlas::{
    atlas::calculate_texture_size, estimate_tone_mapping, load_manifest, AtlasBuilder,
    AtlasConfig, AtlasMetadata, BinPacker, FinalizedAtlas, GuillotinePacker, ShelfPacker,
    TexturePatch, ToneMapping,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patch-atlas")]
#[command(author, version, about = "Pack HDR texture patches into a texture atlas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack patches into an atlas image plus layout JSON
    Pack {
        /// JSON manifest listing the patch images, faces and texcoords
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output path (without extension); writes <output>.png and <output>.json
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Mean scene luminance (estimated from the patches if omitted)
        #[arg(long, requires = "max_luminance")]
        mean_luminance: Option<f32>,

        /// Luminance mapped to white (estimated from the patches if omitted)
        #[arg(long, requires = "mean_luminance")]
        max_luminance: Option<f32>,

        /// Packing strategy
        #[arg(short, long, value_enum, default_value = "guillotine")]
        packer: PackerKind,
    },

    /// Show the estimated atlas size and tone mapping without packing
    Estimate {
        /// JSON manifest listing the patch images, faces and texcoords
        #[arg(short, long)]
        manifest: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Atlas sizing options shared by all subcommands.
#[derive(Args)]
struct ConfigArgs {
    /// Atlas configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum atlas size
    #[arg(long)]
    min_size: Option<u32>,

    /// Maximum atlas size
    #[arg(long)]
    max_size: Option<u32>,
}

impl ConfigArgs {
    /// Load the configuration file (or defaults) and apply size overrides.
    fn atlas_config(&self) -> Result<AtlasConfig, Box<dyn std::error::Error>> {
        let mut atlas_config = match &self.config {
            Some(path) => AtlasConfig::from_json(&fs::read_to_string(path)?)?,
            None => AtlasConfig::default(),
        };
        if let Some(size) = self.min_size {
            atlas_config = atlas_config.with_min_texture_size(size);
        }
        if let Some(size) = self.max_size {
            atlas_config = atlas_config.with_max_texture_size(size);
        }
        atlas_config.validate()?;
        Ok(atlas_config)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PackerKind {
    /// Best-area-fit guillotine packing
    Guillotine,
    /// Row packing
    Shelf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            manifest,
            output,
            config,
            mean_luminance,
            max_luminance,
            packer,
        } => {
            let atlas_config = config.atlas_config()?;

            let tone = match (mean_luminance, max_luminance) {
                (Some(mean), Some(max)) => Some(ToneMapping::new(mean, max)?),
                _ => None,
            };

            pack(&manifest, &output, atlas_config, tone, packer)?;
        }
        Commands::Estimate { manifest, config } => {
            estimate(&manifest, &config.atlas_config()?)?;
        }
    }

    Ok(())
}

fn load_patches(manifest: &Path) -> Result<Vec<TexturePatch>, Box<dyn std::error::Error>> {
    println!("Loading patches from {:?}...", manifest);
    let patches = load_manifest(manifest)?;
    let faces: usize = patches.iter().map(|p| p.faces().len()).sum();
    println!("  Loaded {} patches covering {} faces", patches.len(), faces);
    Ok(patches)
}

fn pack(
    manifest: &Path,
    output: &Path,
    config: AtlasConfig,
    tone: Option<ToneMapping>,
    packer: PackerKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let patches = load_patches(manifest)?;

    let tone = match tone {
        Some(tone) => tone,
        None => estimate_tone_mapping(&patches)?,
    };

    println!("Packing with config:");
    println!(
        "  - Atlas size: {} to {}",
        config.min_texture_size, config.max_texture_size
    );
    println!(
        "  - Tone mapping: mean {:.4}, max {:.4}",
        tone.mean(),
        tone.max()
    );

    let atlas = match packer {
        PackerKind::Guillotine => build_with::<GuillotinePacker>(config, patches, &tone)?,
        PackerKind::Shelf => build_with::<ShelfPacker>(config, patches, &tone)?,
    };

    println!(
        "  Atlas: {}x{} with {} faces, {} unique texcoords",
        atlas.size(),
        atlas.size(),
        atlas.faces().len(),
        atlas.texcoords().len()
    );

    let png_path = output.with_extension("png");
    let json_path = output.with_extension("json");
    atlas.save_png(&png_path)?;

    let image_name = png_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    AtlasMetadata::from_atlas(&atlas)
        .with_image(image_name)
        .save(&json_path)?;

    println!("Exported atlas to {:?}", png_path);
    println!("  Layout: {:?}", json_path);

    Ok(())
}

fn build_with<P: BinPacker>(
    config: AtlasConfig,
    patches: Vec<TexturePatch>,
    tone: &ToneMapping,
) -> patch_atlas::Result<FinalizedAtlas> {
    AtlasBuilder::<P>::with_config(config).build(patches, tone)
}

fn estimate(manifest: &Path, config: &AtlasConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut patches = load_patches(manifest)?;
    patches.sort_by(|a, b| b.size().cmp(&a.size()));

    let size = calculate_texture_size(&patches, config);
    let tone = estimate_tone_mapping(&patches)?;

    println!("\nEstimate:");
    println!("  Atlas size: {}x{}", size, size);
    println!("  Mean luminance: {:.4}", tone.mean());
    println!("  Max luminance: {:.4}", tone.max());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate_config(args: &[&str]) -> AtlasConfig {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Estimate { config, .. } => config.atlas_config().unwrap(),
            Commands::Pack { .. } => panic!("expected estimate"),
        }
    }

    #[test]
    fn test_estimate_accepts_size_flags() {
        let config = estimate_config(&[
            "patch-atlas",
            "estimate",
            "--manifest",
            "patches.json",
            "--min-size",
            "512",
            "--max-size",
            "1024",
        ]);
        assert_eq!(config.min_texture_size, 512);
        assert_eq!(config.max_texture_size, 1024);
    }

    #[test]
    fn test_estimate_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.json");
        fs::write(&path, r#"{"max_texture_size": 2048}"#).unwrap();

        let config = estimate_config(&[
            "patch-atlas",
            "estimate",
            "--manifest",
            "patches.json",
            "--config",
            path.to_str().unwrap(),
        ]);
        assert_eq!(config.max_texture_size, 2048);
    }

    #[test]
    fn test_invalid_size_flag_rejected() {
        let cli = Cli::try_parse_from(["patch-atlas", "estimate", "-m", "p.json", "--max-size", "1000"])
            .unwrap();
        let Commands::Estimate { config, .. } = cli.command else {
            panic!("expected estimate");
        };
        assert!(config.atlas_config().is_err());
    }
}
