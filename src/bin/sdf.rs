//! Command-line front end: generates signed distance fields from mask
//! images and blends several signed distance fields into one.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use sequential_distance_field::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Extensions of the image files picked up by input patterns.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

#[derive(Parser)]
#[command(name = "sdf", version, about = "Signed distance field generator and blender", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a signed distance field for every input image
    Gen(GenArgs),

    /// Blend two or more signed distance fields, in the given order
    Blend(BlendArgs),
}

#[derive(Args)]
struct GenArgs {
    /// Input images, glob patterns are supported (e.g. "masks/*.png")
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output directory, receives one `<name>.sdf.png` per input
    #[arg(short, long, default_value = "sdf_output")]
    output: PathBuf,

    /// Pixels with a green value above this are foreground
    #[arg(short, long, default_value_t = 127)]
    threshold: u8,

    /// Distances saturate at the image height divided by this
    #[arg(short, long, default_value_t = 6.0)]
    saturation_divisor: f64,
}

#[derive(Args)]
struct BlendArgs {
    /// Signed distance fields, glob patterns are supported (e.g. "out/*.sdf.png")
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output image
    #[arg(short, long, default_value = "blended.png")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Commands::Gen(args) => cmd_gen(args),
        Commands::Blend(args) => cmd_blend(args),
    }
}

fn cmd_gen(args: GenArgs) -> anyhow::Result<()> {
    let inputs = expand_patterns(&args.inputs)?;

    let config = GenerateConfig::new()
        .with_saturation(Saturation::HeightFraction(args.saturation_divisor));
    config.validate()?;

    fs::create_dir_all(&args.output)
        .with_context(|| format!("cannot create output directory {}", args.output.display()))?;
    info!("writing {} fields to {}", inputs.len(), args.output.display());

    for input in &inputs {
        let start = Instant::now();

        let image = image::open(input)
            .with_context(|| format!("cannot read {}", input.display()))?
            .to_rgba8();
        info!("{}: {}x{} pixels", input.display(), image.width(), image.height());

        let binary = binary_piston_image::of_rgba_image_with_threshold(&image, args.threshold);
        let field = generate_with_config(&binary, &config)
            .with_context(|| format!("cannot generate field of {}", input.display()))?;

        let output = args.output.join(output_file_name(input));
        field.to_rgba_image().save(&output)
            .with_context(|| format!("cannot write {}", output.display()))?;

        info!("{} -> {} in {:?}", input.display(), output.display(), start.elapsed());
    }

    Ok(())
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let inputs = expand_patterns(&args.inputs)?;
    if inputs.len() < 2 {
        bail!("at least two signed distance fields are required, found {}", inputs.len());
    }

    let mut fields = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let image = image::open(input)
            .with_context(|| format!("cannot read {}", input.display()))?
            .to_rgba8();

        let field = SignedDistanceImage::from_rgba_image(&image);
        if let Some(first) = fields.first().map(SignedDistanceImage::dimensions) {
            if field.dimensions() != first {
                bail!(
                    "{} is {}x{} pixels, but {} is {}x{} pixels",
                    input.display(), field.width(), field.height(),
                    inputs[0].display(), first.0, first.1
                );
            }
        }

        fields.push(field);
    }

    let start = Instant::now();
    let blended = blend(&fields)?;

    if let Some(parent) = args.output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create output directory {}", parent.display()))?;
    }

    blended.to_rgba_image().save(&args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    info!(
        "blended {} adjacent pairs into {} in {:?}",
        fields.len() - 1, args.output.display(), start.elapsed()
    );

    Ok(())
}

/// `masks/glyph.png` becomes `glyph.sdf.png`.
fn output_file_name(input: &Path) -> String {
    let stem = input.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    format!("{}.sdf.png", stem)
}

/// Expands glob patterns into existing image files, in pattern order.
/// A pattern without an extension matches every supported image extension.
fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let candidates: Vec<String> = if Path::new(pattern).extension().is_some() {
            vec![pattern.clone()]
        }
        else {
            IMAGE_EXTENSIONS.iter().map(|extension| format!("{}.{}", pattern, extension)).collect()
        };

        for candidate in candidates {
            let paths = match glob::glob(&candidate) {
                Ok(paths) => paths,
                Err(error) => {
                    warn!("invalid pattern {}: {}", candidate, error);
                    continue;
                }
            };

            for path in paths.filter_map(|entry| entry.ok()) {
                if has_image_extension(&path) && path.is_file() {
                    files.push(path);
                }
            }
        }
    }

    if files.is_empty() {
        bail!("no image files matched, supported formats are {}", IMAGE_EXTENSIONS.join(", "));
    }

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|extension| extension.to_string_lossy().to_lowercase())
        .map_or(false, |extension| IMAGE_EXTENSIONS.contains(&extension.as_str()))
}
