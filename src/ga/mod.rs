//! GA-based timetable optimization.
//!
//! A schedule is its own chromosome: one gene per activity holding the
//! (room, time slot, facilitator) indices. The loop maximizes the
//! rule-based fitness from [`FitnessEvaluator`].
//!
//! # Submodules
//!
//! - [`fitness`]: Additive scoring rules
//! - [`selection`]: Softmax selection and mating pool draws
//! - [`operators`]: Uniform crossover and single-field mutation
//! - `runner`: The generational loop ([`Evolution`])
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

mod config;
pub mod fitness;
pub mod operators;
mod runner;
pub mod selection;

pub use config::{EvolutionConfig, ResultSelection};
pub use fitness::{FitnessBreakdown, FitnessEvaluator};
pub use operators::{MutationField, Reproduction};
pub use runner::{has_converged, Evolution, EvolutionResult, GenerationStats};
