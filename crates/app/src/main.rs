use std::path::{Path, PathBuf};

use aura_core::{AuraConfig, ChainSampler, RingRenderer, SvgSurface, TransitionTable};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() -> aura_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            output,
            config,
            start_mood,
            count,
            factor,
            seed,
        } => {
            let config = load_config(config.as_deref(), start_mood, count, factor)?;
            run_render(&output, &config, seed)
        }
        Commands::Sequence {
            config,
            start_mood,
            count,
            seed,
        } => {
            let config = load_config(config.as_deref(), start_mood, count, None)?;
            run_sequence(&config, seed)
        }
    }
}

fn run_render(output: &Path, config: &AuraConfig, seed: Option<u64>) -> aura_core::Result<()> {
    tracing::info!(
        start_mood = %config.start_mood,
        count = config.count,
        factor = config.factor,
        "rendering aura"
    );

    let sequence = sample_sequence(config, seed)?;
    let mut renderer = RingRenderer::new(SvgSurface::new(), config.colors.clone(), config.factor)?
        .with_stroke_width(config.stroke_width);
    renderer.render(&sequence)?;
    renderer.into_surface().save(output)?;

    tracing::info!(?output, rings = sequence.len() - 1, "aura written");
    Ok(())
}

fn run_sequence(config: &AuraConfig, seed: Option<u64>) -> aura_core::Result<()> {
    tracing::info!(start_mood = %config.start_mood, count = config.count, "sampling moods");

    let sequence = sample_sequence(config, seed)?;
    for mood in &sequence {
        println!("{mood}");
    }
    Ok(())
}

fn sample_sequence(config: &AuraConfig, seed: Option<u64>) -> aura_core::Result<Vec<String>> {
    let table = TransitionTable::new(config.transitions.clone())?;
    let mut sampler = match seed {
        Some(seed) => ChainSampler::with_seed(table, seed),
        None => ChainSampler::new(table),
    };
    sampler.generate(&config.start_mood, config.count)
}

fn load_config(
    path: Option<&Path>,
    start_mood: Option<String>,
    count: Option<usize>,
    factor: Option<u32>,
) -> aura_core::Result<AuraConfig> {
    let mut config = match path {
        Some(path) => AuraConfig::load(path)?,
        None => AuraConfig::default(),
    };

    if let Some(start_mood) = start_mood {
        config.start_mood = start_mood;
    }
    if let Some(count) = count {
        config.count = count;
    }
    if let Some(factor) = factor {
        config.factor = factor;
    }

    Ok(config)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Markov-chain aura generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample a mood sequence and render it as concentric rings in an SVG file.
    Render {
        /// Output path for the generated SVG document.
        output: PathBuf,
        /// Optional JSON configuration overriding the built-in tables.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mood the sequence starts on.
        #[arg(long)]
        start_mood: Option<String>,
        /// Number of moods to sample (rings drawn = count - 1).
        #[arg(long)]
        count: Option<usize>,
        /// Radial width of each ring.
        #[arg(long)]
        factor: Option<u32>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Sample a mood sequence and print it, one mood per line.
    Sequence {
        /// Optional JSON configuration overriding the built-in tables.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mood the sequence starts on.
        #[arg(long)]
        start_mood: Option<String>,
        /// Number of moods to sample.
        #[arg(long)]
        count: Option<usize>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}
