//! Schedule (candidate solution) model.
//!
//! A schedule binds every activity in a [`Catalog`] to a room, a time slot
//! and a facilitator. It doubles as the GA chromosome: one gene per activity.
//!
//! # Encoding
//!
//! `assignments[i]` always belongs to `catalog.activities[i]`. Genes hold
//! catalog indices, so an [`Assignment`] is `Copy` and offspring never share
//! storage with their parents.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Catalog;

/// One activity bound to a room, a time slot and a facilitator.
///
/// All fields are indices into the owning [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Activity index.
    pub activity: usize,
    /// Room index.
    pub room: usize,
    /// Time slot index.
    pub time_slot: usize,
    /// Facilitator index.
    pub facilitator: usize,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(activity: usize, room: usize, time_slot: usize, facilitator: usize) -> Self {
        Self {
            activity,
            room,
            time_slot,
            facilitator,
        }
    }

    /// Draws room, time slot and facilitator uniformly at random.
    pub fn random<R: Rng>(activity: usize, catalog: &Catalog, rng: &mut R) -> Self {
        Self {
            activity,
            room: rng.random_range(0..catalog.rooms.len()),
            time_slot: rng.random_range(0..catalog.time_slots.len()),
            facilitator: rng.random_range(0..catalog.facilitators.len()),
        }
    }
}

/// A complete candidate timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// One assignment per activity, in catalog order.
    pub assignments: Vec<Assignment>,
}

impl Schedule {
    /// Creates a schedule from explicit assignments.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Creates a random schedule.
    ///
    /// Each assignment's room, time slot and facilitator are drawn
    /// independently and uniformly from the catalog.
    pub fn random<R: Rng>(catalog: &Catalog, rng: &mut R) -> Self {
        let assignments = (0..catalog.activity_count())
            .map(|i| Assignment::random(i, catalog, rng))
            .collect();
        Self { assignments }
    }

    /// Number of assignments.
    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the schedule has no assignments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Checks the schedule against a catalog.
    ///
    /// Valid when there is exactly one assignment per activity, in
    /// position, and every index is within its catalog.
    pub fn is_valid(&self, catalog: &Catalog) -> bool {
        if self.assignments.len() != catalog.activity_count() {
            return false;
        }
        self.assignments.iter().enumerate().all(|(i, a)| {
            a.activity == i
                && a.room < catalog.rooms.len()
                && a.time_slot < catalog.time_slots.len()
                && a.facilitator < catalog.facilitators.len()
        })
    }

    /// Assignments taught by a facilitator.
    pub fn assignments_for_facilitator(
        &self,
        facilitator: usize,
    ) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |a| a.facilitator == facilitator)
    }
}
