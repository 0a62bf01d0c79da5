//! Softmax fitness-proportional selection.
//!
//! Turns a population's fitness vector into a sampling distribution and
//! resamples a mating pool from it.
//!
//! # Procedure
//!
//! 1. `p_i = exp(f_i) / sum_j exp(f_j)` (no temperature).
//! 2. Draw `n` indices with replacement according to `p`, in draw order.
//! 3. Parents come from the first half of the pool **by draw position**.
//!    This is not an elite cut: the pool is unsorted, so the "first half"
//!    is just a uniform sub-sample of the resampled pool.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// Softmax over raw fitness values.
///
/// Shifts by the maximum before exponentiating, which leaves the
/// distribution unchanged but keeps large fitness values from
/// overflowing. Returns an empty vector for empty input.
pub fn softmax(fitness: &[f64]) -> Vec<f64> {
    let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = fitness.iter().map(|&f| (f - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Draws `size` population indices with replacement, weighted by `probabilities`.
///
/// Falls back to uniform draws if the weights are degenerate
/// (e.g., contain NaN), which a finite fitness vector never produces.
pub fn draw_mating_pool<R: Rng>(probabilities: &[f64], size: usize, rng: &mut R) -> Vec<usize> {
    if probabilities.is_empty() {
        return Vec::new();
    }
    match WeightedIndex::new(probabilities) {
        Ok(dist) => (0..size).map(|_| dist.sample(rng)).collect(),
        Err(err) => {
            tracing::warn!(%err, "degenerate selection weights; drawing uniformly");
            (0..size)
                .map(|_| rng.random_range(0..probabilities.len()))
                .collect()
        }
    }
}

/// Picks two distinct positions from the first half of a mating pool.
///
/// Returns the population indices stored at those positions (which may be
/// equal when the same schedule was drawn twice). The pool must hold at
/// least four entries.
pub fn pick_parents<R: Rng>(pool: &[usize], rng: &mut R) -> (usize, usize) {
    let half = &pool[..pool.len() / 2];
    debug_assert!(half.len() >= 2, "mating half needs two positions");
    let picks = rand::seq::index::sample(rng, half.len(), 2);
    (half[picks.index(0)], half[picks.index(1)])
}
