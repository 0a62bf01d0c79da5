use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::de::DeserializeOwned;
use u_timetable::ga::{Evolution, EvolutionConfig, ResultSelection};
use u_timetable::models::Catalog;
use u_timetable::report::ScheduleReport;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResultArg {
    Fittest,
    First,
}

impl From<ResultArg> for ResultSelection {
    fn from(arg: ResultArg) -> Self {
        match arg {
            ResultArg::Fittest => ResultSelection::Fittest,
            ResultArg::First => ResultSelection::First,
        }
    }
}

/// Course timetabling by genetic algorithm.
#[derive(Debug, Parser)]
#[command(name = "u-timetable", version, about)]
struct Cli {
    /// Catalog JSON (rooms, time slots, facilitators, activities, rules).
    /// Defaults to the built-in SLA catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// EvolutionConfig JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    population_size: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Generations before convergence checks begin.
    #[arg(long)]
    warmup: Option<usize>,

    /// Relative mean-fitness change that counts as converged.
    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Disable the rayon thread pool.
    #[arg(long)]
    sequential: bool,

    /// Which schedule of the final population to report.
    #[arg(long, value_enum)]
    result: Option<ResultArg>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn evolution_config(&self) -> Result<EvolutionConfig> {
        let mut config = match &self.config {
            Some(path) => read_json::<EvolutionConfig>(path)?,
            None => EvolutionConfig::default(),
        };
        if let Some(size) = self.population_size {
            config = config.with_population_size(size);
        }
        if let Some(generations) = self.generations {
            config = config.with_max_generations(generations);
        }
        if let Some(rate) = self.mutation_rate {
            config = config.with_mutation_rate(rate);
        }
        if let Some(warmup) = self.warmup {
            config = config.with_warmup_generations(warmup);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_convergence_threshold(threshold);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.sequential {
            config = config.with_parallel(false);
        }
        if let Some(result) = self.result {
            config = config.with_result_selection(result.into());
        }
        Ok(config)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = match &cli.catalog {
        Some(path) => read_json::<Catalog>(path)?,
        None => Catalog::builtin(),
    };
    let config = cli.evolution_config()?;

    let result = Evolution::run(&catalog, &config)?;
    let report = ScheduleReport::from_result(&catalog, &result);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
