//! `iconfit` CLI - normalize app icons and optimize illustrations.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iconfit::normalize::{DEFAULT_SCALE, DEFAULT_THRESHOLD};
use iconfit::optimize::DEFAULT_MAX_SIZE;
use iconfit::{Color, NormalizeConfig, Normalizer, OptimizeOptions, Size};

/// Strip near-white backgrounds from icons and recenter them on a fixed canvas.
#[derive(Parser, Debug)]
#[command(name = "iconfit")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a single image.
    Normalize {
        /// Input image path.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PNG path. May equal INPUT.
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        params: NormalizeArgs,
    },

    /// Run every job of a manifest, or the Expo icon preset.
    Batch {
        /// TOML manifest listing the assets.
        #[arg(short, long, value_name = "FILE", conflicts_with = "assets")]
        manifest: Option<PathBuf>,

        /// Directory holding `icon.png` for the Expo preset.
        #[arg(short, long, value_name = "DIR", default_value = "assets")]
        assets: PathBuf,
    },

    /// Flatten transparency and shrink illustrations in place.
    Optimize {
        /// Images to optimize.
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Maximum width and height.
        #[arg(long, default_value_t = DEFAULT_MAX_SIZE, value_name = "INT")]
        max_size: u32,

        /// Color transparent regions are flattened onto.
        #[arg(long, default_value = "#FFFFFF", value_name = "COLOR")]
        background: Color,
    },
}

#[derive(clap::Args, Debug)]
struct NormalizeArgs {
    /// Output canvas size, `WIDTHxHEIGHT` or a single edge.
    #[arg(long, default_value = "1024x1024", value_name = "SIZE")]
    size: Size,

    /// Fraction (0.0-1.0] of the canvas the content spans.
    #[arg(short, long, default_value_t = DEFAULT_SCALE, value_name = "FLOAT")]
    scale: f64,

    /// Channel value above which a pixel counts as background (0-255).
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, value_name = "INT")]
    threshold: u8,

    /// Canvas color, `#RRGGBB` or `r,g,b`.
    #[arg(short, long, default_value = "#F5F5F5", value_name = "COLOR")]
    background: Color,
}

impl From<&NormalizeArgs> for NormalizeConfig {
    fn from(args: &NormalizeArgs) -> Self {
        Self {
            target: args.size,
            scale: args.scale,
            threshold: args.threshold,
            background: args.background,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("iconfit={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Normalize {
            input,
            output,
            params,
        } => normalize(input, output, params),
        Command::Batch { manifest, assets } => batch(manifest.as_ref(), assets),
        Command::Optimize {
            files,
            max_size,
            background,
        } => optimize(
            files,
            OptimizeOptions {
                max_size: *max_size,
                background: *background,
            },
        ),
    }
}

fn normalize(input: &Path, output: &Path, params: &NormalizeArgs) -> Result<()> {
    // Validate input file exists
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let normalizer =
        Normalizer::new(params.into()).context("Invalid normalization parameters")?;

    let layout = normalizer
        .process(input, output)
        .context("Failed to normalize image")?;

    println!(
        "Successfully processed {} -> {} (content {}x{})",
        input.display(),
        output.display(),
        layout.content.0,
        layout.content.1
    );

    Ok(())
}

fn batch(manifest: Option<&PathBuf>, assets: &Path) -> Result<()> {
    let jobs = match manifest {
        Some(path) => iconfit::load_manifest(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => iconfit::expo_preset(assets),
    };

    if jobs.is_empty() {
        anyhow::bail!("No assets to process");
    }

    let report = iconfit::run_batch(&jobs);

    for failure in &report.failures {
        tracing::error!("{}: {}", failure.name, failure.error);
    }
    if !report.is_success() {
        anyhow::bail!(
            "{} of {} assets failed",
            report.failures.len(),
            jobs.len()
        );
    }

    println!("Successfully processed {} assets", report.succeeded);
    Ok(())
}

fn optimize(files: &[PathBuf], options: OptimizeOptions) -> Result<()> {
    options.validate().context("Invalid optimize options")?;

    let mut failed = 0usize;
    for file in files {
        match iconfit::optimize_file(file, file, &options) {
            Ok((width, height)) => println!("Optimized: {} ({width}x{height})", file.display()),
            Err(err) => {
                tracing::error!("Failed to optimize {}: {err}", file.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} images failed", files.len());
    }

    Ok(())
}
