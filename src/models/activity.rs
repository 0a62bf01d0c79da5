//! Activity (course section) model.
//!
//! An activity is the unit being timetabled: one section of a course with
//! an expected enrollment and two tiers of facilitator preference.
//!
//! # Preference Tiers
//!
//! - **Preferred**: facilitators the department wants on this section.
//! - **Other**: acceptable fallbacks.
//! - Anyone else is unsuitable but still schedulable (penalized in fitness).

use serde::{Deserialize, Serialize};

/// An activity (course section) to be scheduled.
///
/// Activities are defined once in the [`Catalog`](super::Catalog) and never
/// mutated during a run. A [`Schedule`](super::Schedule) refers to them by
/// index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Section name (e.g., "SLA101A").
    pub name: String,
    /// Expected number of enrolled students.
    pub expected_enrollment: u32,
    /// Facilitators preferred for this section.
    #[serde(default)]
    pub preferred_facilitators: Vec<String>,
    /// Facilitators that are acceptable but not preferred.
    #[serde(default)]
    pub other_facilitators: Vec<String>,
}

/// How well a facilitator fits an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacilitatorFit {
    /// Listed in the preferred set.
    Preferred,
    /// Listed in the other-acceptable set.
    Acceptable,
    /// Not listed at all.
    Unsuitable,
}

impl Activity {
    /// Creates an activity with no facilitator preferences.
    pub fn new(name: impl Into<String>, expected_enrollment: u32) -> Self {
        Self {
            name: name.into(),
            expected_enrollment,
            preferred_facilitators: Vec::new(),
            other_facilitators: Vec::new(),
        }
    }

    /// Sets the preferred facilitators.
    pub fn with_preferred<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.preferred_facilitators = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the other acceptable facilitators.
    pub fn with_other<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.other_facilitators = names.into_iter().map(Into::into).collect();
        self
    }

    /// Classifies a facilitator against this activity's preference tiers.
    ///
    /// The preferred tier wins if a name appears in both lists.
    pub fn facilitator_fit(&self, facilitator: &str) -> FacilitatorFit {
        if self.preferred_facilitators.iter().any(|f| f == facilitator) {
            FacilitatorFit::Preferred
        } else if self.other_facilitators.iter().any(|f| f == facilitator) {
            FacilitatorFit::Acceptable
        } else {
            FacilitatorFit::Unsuitable
        }
    }
}
