//! Course timetabling by genetic algorithm.
//!
//! Assigns each course section to a room, a time slot and a facilitator,
//! maximizing an additive rule-based fitness with a softmax-selection GA.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Activity`, `Room`, `TimeSlot`,
//!   `Facilitator`, `Catalog`, `ScoringRules`, `Schedule`, `Assignment`
//! - **`ga`**: Fitness evaluation, selection, reproduction and the
//!   evolution loop
//! - **`validation`**: Fail-fast catalog and hyperparameter checks
//! - **`report`**: Name-resolved text/JSON output of a schedule
//!
//! # Quick start
//!
//! ```no_run
//! use u_timetable::ga::{Evolution, EvolutionConfig};
//! use u_timetable::models::Catalog;
//! use u_timetable::report::ScheduleReport;
//!
//! let catalog = Catalog::builtin();
//! let config = EvolutionConfig::default()
//!     .with_population_size(500)
//!     .with_max_generations(200)
//!     .with_seed(7);
//! let result = Evolution::run(&catalog, &config).unwrap();
//! print!("{}", ScheduleReport::from_result(&catalog, &result));
//! ```
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod ga;
pub mod models;
pub mod report;
pub mod validation;
