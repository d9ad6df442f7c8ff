#![deny(clippy::all, clippy::pedantic)]

use anyhow::{Context, Result};
use clap::Parser;
use neuro::{Session, SimulationConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Evolve neural-network drivers on a ring track.
#[derive(Parser, Debug)]
#[command(name = "neuro_sim", version)]
struct Cli {
    /// JSON simulation config; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to evolve.
    #[arg(long, default_value_t = 20)]
    generations: usize,
    /// Maximum simulation steps per generation.
    #[arg(long, default_value_t = 400)]
    steps: usize,
    /// Overrides the config's population size.
    #[arg(long)]
    population: Option<usize>,
    /// Overrides the config's random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Writes the best genome of the final generation here as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimulationConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };
    if let Some(population) = cli.population {
        config.population_size = population;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut session = Session::new(config)?;

    tracing::info!(
        "Starting evolution for {} generations of up to {} steps...",
        cli.generations,
        cli.steps
    );
    let reports = runtime::run(&mut session, cli.generations, cli.steps)?;
    if let Some(last) = reports.last() {
        tracing::info!(
            "Evolution finished at generation {} with best fitness {:.2}.",
            last.generation,
            last.best_fitness
        );
    }

    if let Some(path) = &cli.out {
        let genome = session.best_genome().context("population is empty")?;
        std::fs::write(path, genome.to_json_pretty()?)
            .with_context(|| format!("writing genome to {}", path.display()))?;
        tracing::info!("Best genome written to {}", path.display());
    }

    Ok(())
}
