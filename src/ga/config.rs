//! Evolution hyperparameters.

use serde::{Deserialize, Serialize};

/// Which schedule of the final population is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSelection {
    /// The highest-fitness schedule of the final population.
    #[default]
    Fittest,
    /// The schedule at position 0 of the final population.
    First,
}

/// Hyperparameters for [`Evolution`](super::Evolution).
///
/// # Example
/// ```
/// use u_timetable::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_max_generations(50)
///     .with_seed(42)
///     .with_parallel(false);
/// assert_eq!(config.population_size, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Schedules per generation.
    pub population_size: usize,
    /// Generation cap.
    pub max_generations: usize,
    /// Probability that an assignment has one field redrawn.
    pub mutation_rate: f64,
    /// Convergence is only checked once the generation counter exceeds this.
    pub warmup_generations: usize,
    /// Stop when mean fitness changes by less than this fraction of the
    /// previous generation's mean.
    pub convergence_threshold: f64,
    /// RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Evaluate and reproduce on the rayon thread pool.
    pub parallel: bool,
    /// Final schedule selection.
    pub result_selection: ResultSelection,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            max_generations: 1_000,
            mutation_rate: 0.01,
            warmup_generations: 100,
            convergence_threshold: 0.01,
            seed: None,
            parallel: true,
            result_selection: ResultSelection::Fittest,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the warm-up generation count for convergence checks.
    pub fn with_warmup_generations(mut self, generations: usize) -> Self {
        self.warmup_generations = generations;
        self
    }

    /// Sets the relative-change convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation and reproduction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the final schedule selection.
    pub fn with_result_selection(mut self, selection: ResultSelection) -> Self {
        self.result_selection = selection;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 10_000);
        assert_eq!(config.max_generations, 1_000);
        assert_eq!(config.mutation_rate, 0.01);
        assert_eq!(config.warmup_generations, 100);
        assert_eq!(config.convergence_threshold, 0.01);
        assert_eq!(config.result_selection, ResultSelection::Fittest);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EvolutionConfig =
            serde_json::from_str(r#"{"population_size": 64, "result_selection": "first"}"#)
                .unwrap();
        assert_eq!(config.population_size, 64);
        assert_eq!(config.result_selection, ResultSelection::First);
        assert_eq!(config.max_generations, 1_000);
        assert!(config.parallel);
    }
}
