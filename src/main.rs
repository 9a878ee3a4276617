use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notan_study::models::{EngineConfig, PosterizeRequest, ThresholdRequest};
use notan_study::services::StudyEngine;

#[derive(Parser)]
#[command(name = "notan-study")]
#[command(about = "Reduce photos to flat tonal studies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster a photo into a fixed number of flat gray tones
    Posterize {
        /// Source image path (file:// prefixes are accepted)
        #[arg(short, long)]
        source: String,

        /// Number of tones in the study
        #[arg(short, long)]
        tones: i32,

        /// Bilateral smoothing strength before clustering (0 = off)
        #[arg(long, default_value_t = 0)]
        simplicity: u32,

        /// Gaussian blur radius before clustering (0 = off)
        #[arg(long, default_value_t = 0)]
        focus_blur: u32,

        /// Directory results are stored in (defaults to a temp cache)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Fixed clustering seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Keep earlier results instead of evicting them
        #[arg(long)]
        keep_previous: bool,
    },
    /// Split a photo into brightness bands at fixed cutoffs
    Threshold {
        /// Source image path (file:// prefixes are accepted)
        #[arg(short, long)]
        source: String,

        /// Comma-separated brightness cutoffs, e.g. 85,170
        #[arg(short, long, value_delimiter = ',')]
        cutoffs: Vec<i32>,

        /// Directory results are stored in (defaults to a temp cache)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Keep earlier results instead of evicting them
        #[arg(long)]
        keep_previous: bool,
    },
    /// Print the brightness histogram of a photo as JSON
    Histogram {
        /// Source image path (file:// prefixes are accepted)
        #[arg(short, long)]
        source: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Minimal logging for CLI use; RUST_LOG overrides.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notan_study=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Posterize {
            source,
            tones,
            simplicity,
            focus_blur,
            out_dir,
            seed,
            keep_previous,
        } => run_posterize_command(
            source,
            tones,
            simplicity,
            focus_blur,
            out_dir,
            seed,
            keep_previous,
        ),
        Commands::Threshold {
            source,
            cutoffs,
            out_dir,
            keep_previous,
        } => run_threshold_command(source, cutoffs, out_dir, keep_previous),
        Commands::Histogram { source } => run_histogram_command(&source),
    }
}

fn build_config(out_dir: Option<PathBuf>, keep_previous: bool) -> EngineConfig {
    let mut config = match out_dir {
        Some(dir) => EngineConfig::new(dir),
        None => EngineConfig::default(),
    };
    config.evict_previous = !keep_previous;
    config
}

/// Run the posterize pipeline and print the stored preview path
fn run_posterize_command(
    source: String,
    tones: i32,
    simplicity: u32,
    focus_blur: u32,
    out_dir: Option<PathBuf>,
    seed: Option<u64>,
    keep_previous: bool,
) -> anyhow::Result<()> {
    let mut config = build_config(out_dir, keep_previous);
    config.clustering_seed = seed;

    let engine = StudyEngine::new(config)?;
    let request = PosterizeRequest {
        source,
        tones,
        simplicity,
        focus_blur,
    };

    let path = engine.posterize(&request)?;
    println!("{}", path.display());
    Ok(())
}

/// Run the threshold pipeline and print the stored preview path
fn run_threshold_command(
    source: String,
    cutoffs: Vec<i32>,
    out_dir: Option<PathBuf>,
    keep_previous: bool,
) -> anyhow::Result<()> {
    let engine = StudyEngine::new(build_config(out_dir, keep_previous))?;
    let request = ThresholdRequest { source, cutoffs };

    let path = engine.threshold(&request)?;
    println!("{}", path.display());
    Ok(())
}

/// Measure a photo's brightness distribution and print 256 bin counts as JSON
fn run_histogram_command(source: &str) -> anyhow::Result<()> {
    let engine = StudyEngine::new(EngineConfig::default())?;
    let histogram = engine.histogram(source)?;

    println!("{}", serde_json::to_string(&histogram.counts()[..])?);
    Ok(())
}
