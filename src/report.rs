//! Human- and machine-readable schedule reports.
//!
//! Resolves catalog indices back to names. The text form prints the
//! fitness (two decimals) followed by one line per activity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ga::{EvolutionResult, FitnessBreakdown, FitnessEvaluator};
use crate::models::{Catalog, Schedule};

/// One activity's placement, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// Activity name.
    pub activity: String,
    /// Room name.
    pub room: String,
    /// Time slot label.
    pub time_slot: String,
    /// Facilitator name.
    pub facilitator: String,
}

/// A schedule with its score, ready for printing or serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Total fitness.
    pub fitness: f64,
    /// Fitness by rule family.
    pub breakdown: FitnessBreakdown,
    /// Generations evaluated, when produced by a run.
    pub generations: Option<usize>,
    /// Early-stop generation, when the run converged.
    pub early_stopped_at: Option<usize>,
    /// Seed of the run.
    pub seed: Option<u64>,
    /// Placements in catalog order.
    pub assignments: Vec<AssignmentRow>,
}

impl ScheduleReport {
    /// Builds a report for a schedule, scoring it against the catalog.
    pub fn from_schedule(catalog: &Catalog, schedule: &Schedule) -> Self {
        let breakdown = FitnessEvaluator::new(catalog).evaluate_detailed(schedule);
        let assignments = schedule
            .assignments
            .iter()
            .map(|a| AssignmentRow {
                activity: catalog.activities[a.activity].name.clone(),
                room: catalog.rooms[a.room].name.clone(),
                time_slot: catalog.time_slots[a.time_slot].label().to_string(),
                facilitator: catalog.facilitators[a.facilitator].name().to_string(),
            })
            .collect();

        Self {
            fitness: breakdown.total(),
            breakdown,
            generations: None,
            early_stopped_at: None,
            seed: None,
            assignments,
        }
    }

    /// Builds a report for the schedule returned by a run.
    pub fn from_result(catalog: &Catalog, result: &EvolutionResult) -> Self {
        Self {
            generations: Some(result.generations),
            early_stopped_at: result.early_stopped_at,
            seed: Some(result.seed),
            ..Self::from_schedule(catalog, &result.best)
        }
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(generation) = self.early_stopped_at {
            writeln!(f, "Early stopping at generation: {generation}")?;
        }
        writeln!(f, "Best schedule fitness: {:.2}", self.fitness)?;
        writeln!(f)?;
        writeln!(f, "Best schedule:")?;
        for row in &self.assignments {
            writeln!(
                f,
                "Activity: {}, Room: {}, Time: {}, Facilitator: {}",
                row.activity, row.room, row.time_slot, row.facilitator
            )?;
        }
        Ok(())
    }
}
