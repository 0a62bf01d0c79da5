//! Generational evolution loop.
//!
//! # Algorithm
//!
//! ```text
//! init population
//! loop:
//!     evaluate fitness            (parallel if enabled)
//!     stop if converged           (after warm-up)
//!     softmax -> mating pool
//!     pairs from first half of pool -> crossover + mutation
//!     truncate to population size
//! return one schedule of the final population
//! ```
//!
//! # Reproducibility
//!
//! Every random draw descends from a single seed. Reproduction hands each
//! parent pair its own `SmallRng`, seeded sequentially from the main RNG,
//! so a seed yields the same result with or without parallelism.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::{EvolutionConfig, ResultSelection};
use super::fitness::FitnessEvaluator;
use super::operators::Reproduction;
use super::selection::{draw_mating_pool, pick_parents, softmax};
use crate::models::{Catalog, Schedule};
use crate::validation::{validate_catalog, validate_config, ConfigError};

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation counter (0-based).
    pub generation: usize,
    /// Mean population fitness.
    pub mean_fitness: f64,
    /// Highest population fitness.
    pub best_fitness: f64,
}

impl GenerationStats {
    fn from_fitness(generation: usize, fitness: &[f64]) -> Self {
        let mean_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;
        let best_fitness = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            generation,
            mean_fitness,
            best_fitness,
        }
    }
}

/// Outcome of an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Schedule chosen from the final population.
    pub best: Schedule,
    /// Fitness of `best`, recomputed on the final population.
    pub best_fitness: f64,
    /// Number of generations evaluated.
    pub generations: usize,
    /// Generation at which convergence stopped the run, if it did.
    pub early_stopped_at: Option<usize>,
    /// Per-generation fitness statistics.
    pub history: Vec<GenerationStats>,
    /// Seed that reproduces this run.
    pub seed: u64,
}

/// Whether the run has converged.
///
/// True only once `generation > warmup` and the mean moved by less than
/// `threshold * |previous_mean|` since the previous generation.
pub fn has_converged(
    generation: usize,
    warmup: usize,
    previous_mean: Option<f64>,
    current_mean: f64,
    threshold: f64,
) -> bool {
    if generation <= warmup {
        return false;
    }
    match previous_mean {
        Some(prev) => (current_mean - prev).abs() < threshold * prev.abs(),
        None => false,
    }
}

/// Genetic algorithm driver for timetabling.
///
/// # Example
/// ```no_run
/// use u_timetable::ga::{Evolution, EvolutionConfig};
/// use u_timetable::models::Catalog;
///
/// let catalog = Catalog::builtin();
/// let config = EvolutionConfig::default().with_seed(42);
/// let result = Evolution::run(&catalog, &config).unwrap();
/// println!("fitness {:.2}", result.best_fitness);
/// ```
pub struct Evolution;

impl Evolution {
    /// Validates the inputs and runs the search.
    ///
    /// # Errors
    /// Returns [`ConfigError`] listing every catalog and hyperparameter
    /// problem; no generation runs in that case.
    pub fn run(
        catalog: &Catalog,
        config: &EvolutionConfig,
    ) -> Result<EvolutionResult, ConfigError> {
        let mut errors = Vec::new();
        if let Err(e) = validate_catalog(catalog) {
            errors.extend(e);
        }
        if let Err(e) = validate_config(config) {
            errors.extend(e);
        }
        if !errors.is_empty() {
            return Err(ConfigError::from(errors));
        }

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(seed);
        let size = config.population_size;
        let evaluator = FitnessEvaluator::new(catalog);
        let reproduction = Reproduction::new(catalog, config.mutation_rate);

        info!(
            seed,
            population_size = size,
            max_generations = config.max_generations,
            activities = catalog.activity_count(),
            "starting evolution"
        );

        let mut population: Vec<Schedule> =
            (0..size).map(|_| Schedule::random(catalog, &mut rng)).collect();
        let mut history = Vec::new();
        let mut previous_mean = None;
        let mut early_stopped_at = None;

        for generation in 0..config.max_generations {
            let fitness = evaluate_population(&evaluator, &population, config.parallel);
            let stats = GenerationStats::from_fitness(generation, &fitness);
            debug!(
                generation,
                mean = stats.mean_fitness,
                best = stats.best_fitness,
                "generation evaluated"
            );
            history.push(stats);

            if has_converged(
                generation,
                config.warmup_generations,
                previous_mean,
                stats.mean_fitness,
                config.convergence_threshold,
            ) {
                info!(generation, mean = stats.mean_fitness, "early stopping");
                early_stopped_at = Some(generation);
                break;
            }
            previous_mean = Some(stats.mean_fitness);

            let probabilities = softmax(&fitness);
            let pool = draw_mating_pool(&probabilities, size, &mut rng);
            population = next_generation(
                &population,
                &pool,
                &reproduction,
                size,
                config.parallel,
                &mut rng,
            );
        }

        let fitness = evaluate_population(&evaluator, &population, config.parallel);
        let index = match config.result_selection {
            ResultSelection::Fittest => argmax(&fitness),
            ResultSelection::First => 0,
        };
        let best_fitness = fitness[index];
        let best = population.swap_remove(index);

        info!(
            generations = history.len(),
            best_fitness,
            early_stop = early_stopped_at.is_some(),
            "evolution finished"
        );

        Ok(EvolutionResult {
            best,
            best_fitness,
            generations: history.len(),
            early_stopped_at,
            history,
            seed,
        })
    }
}

fn evaluate_population(
    evaluator: &FitnessEvaluator<'_>,
    population: &[Schedule],
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        population.par_iter().map(|s| evaluator.evaluate(s)).collect()
    } else {
        population.iter().map(|s| evaluator.evaluate(s)).collect()
    }
}

fn next_generation<R: Rng>(
    population: &[Schedule],
    pool: &[usize],
    reproduction: &Reproduction<'_>,
    size: usize,
    parallel: bool,
    rng: &mut R,
) -> Vec<Schedule> {
    let seeds: Vec<u64> = (0..size.div_ceil(2)).map(|_| rng.random()).collect();

    let breed = |seed: &u64| {
        let mut pair_rng = SmallRng::seed_from_u64(*seed);
        let (a, b) = pick_parents(pool, &mut pair_rng);
        reproduction.reproduce(&population[a], &population[b], &mut pair_rng)
    };

    let offspring: Vec<(Schedule, Schedule)> = if parallel {
        seeds.par_iter().map(breed).collect()
    } else {
        seeds.iter().map(breed).collect()
    };

    let mut next: Vec<Schedule> = offspring
        .into_iter()
        .flat_map(|(c1, c2)| [c1, c2])
        .collect();
    next.truncate(size);
    next
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn small_config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(10)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_run_produces_valid_schedule() {
        let cat = Catalog::builtin();
        let result = Evolution::run(&cat, &small_config()).unwrap();

        assert!(result.best.is_valid(&cat));
        assert!(result.best_fitness.is_finite());
        assert_eq!(result.generations, 10);
        assert_eq!(result.history.len(), 10);
        assert_eq!(result.early_stopped_at, None);
        assert_eq!(result.seed, 42);

        let eval = FitnessEvaluator::new(&cat);
        assert_eq!(eval.evaluate(&result.best), result.best_fitness);
    }

    #[test]
    fn test_same_seed_same_result() {
        let cat = Catalog::builtin();
        let a = Evolution::run(&cat, &small_config()).unwrap();
        let b = Evolution::run(&cat, &small_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let cat = Catalog::builtin();
        let seq = Evolution::run(&cat, &small_config()).unwrap();
        let par = Evolution::run(&cat, &small_config().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_odd_population_size_truncates() {
        let cat = Catalog::builtin();
        let config = small_config().with_population_size(7).with_max_generations(3);
        let result = Evolution::run(&cat, &config).unwrap();
        assert_eq!(result.generations, 3);
        assert!(result.best.is_valid(&cat));
    }

    #[test]
    fn test_fittest_not_worse_than_first() {
        let cat = Catalog::builtin();
        let fittest = Evolution::run(&cat, &small_config()).unwrap();
        let first = Evolution::run(
            &cat,
            &small_config().with_result_selection(ResultSelection::First),
        )
        .unwrap();
        assert!(fittest.best_fitness >= first.best_fitness);
    }

    #[test]
    fn test_mean_fitness_improves() {
        let cat = Catalog::builtin();
        let config = small_config()
            .with_population_size(200)
            .with_max_generations(30)
            .with_convergence_threshold(0.0);
        let result = Evolution::run(&cat, &config).unwrap();
        let first = result.history.first().unwrap().mean_fitness;
        let last = result.history.last().unwrap().mean_fitness;
        assert!(last > first, "first {first}, last {last}");
    }

    #[test]
    fn test_early_stop_after_warmup() {
        let cat = Catalog::builtin();
        let config = small_config()
            .with_warmup_generations(0)
            .with_convergence_threshold(1e9);
        let result = Evolution::run(&cat, &config).unwrap();
        assert_eq!(result.early_stopped_at, Some(1));
        assert_eq!(result.generations, 2);
    }

    #[test]
    fn test_no_early_stop_with_zero_threshold() {
        let cat = Catalog::builtin();
        let config = small_config()
            .with_warmup_generations(0)
            .with_convergence_threshold(0.0);
        let result = Evolution::run(&cat, &config).unwrap();
        assert_eq!(result.early_stopped_at, None);
        assert_eq!(result.generations, 10);
    }

    #[test]
    fn test_has_converged() {
        // Within warm-up: never.
        assert!(!has_converged(5, 10, Some(1.0), 1.0, 0.01));
        assert!(!has_converged(10, 10, Some(1.0), 1.0, 0.01));
        // Past warm-up, small relative change.
        assert!(has_converged(11, 10, Some(2.0), 2.01, 0.01));
        // Past warm-up, large relative change.
        assert!(!has_converged(11, 10, Some(2.0), 2.5, 0.01));
        // Negative means use the magnitude of the previous mean.
        assert!(has_converged(11, 10, Some(-2.0), -2.01, 0.01));
        // No previous generation.
        assert!(!has_converged(11, 10, None, 2.0, 0.01));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let cat = Catalog::new(vec![], vec![], vec![], vec![]);
        let config = small_config().with_mutation_rate(2.0);
        let err = Evolution::run(&cat, &config).unwrap_err();
        assert!(err
            .errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyCatalog));
        assert!(err
            .errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidHyperparameter));
    }

    #[test]
    fn test_argmax_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 2.0, 3.0]), 1);
        assert_eq!(argmax(&[-1.0]), 0);
    }
}
