//! Rule-based schedule fitness.
//!
//! Scores a [`Schedule`] as a plain sum of additive deltas. Higher is better.
//!
//! # Per-activity rules
//!
//! | Rule | Condition | Delta |
//! |------|-----------|-------|
//! | Room too small | capacity < enrollment | -0.5 |
//! | Room far too big | capacity > 6x enrollment | -0.4 |
//! | Room somewhat too big | capacity > 3x enrollment | -0.2 |
//! | Room well sized | otherwise | +0.3 |
//! | Preferred facilitator | in preferred set | +0.5 |
//! | Acceptable facilitator | in other set | +0.2 |
//! | Unsuitable facilitator | neither | -0.1 |
//!
//! # Cross-activity rules
//!
//! | Rule | Condition | Delta |
//! |------|-----------|-------|
//! | Room double-booked | per (slot, room) with >1 activity | -0.5 |
//! | Facilitator single in slot | per (slot, facilitator) with 1 activity | +0.2 |
//! | Facilitator double in slot | per (slot, facilitator) with >1 activity | -0.2 |
//! | Overloaded facilitator | >4 activities total | -0.5 |
//! | Underloaded facilitator | 1 or 2 activities, not load-exempt | -0.4 |
//! | Lecture sections same slot | group of exactly two sections | -0.5 |
//! | Lecture sections far apart | slot distance > 4 | +0.5 |
//! | Paired groups adjacent | slot distance 1 | +0.5 |
//! | ... crossing specific rooms | see [`CrossGroupRoomCheck`] | -0.4 |
//! | Paired groups one apart | slot distance 2 | +0.25 |
//! | Paired groups same slot | slot distance 0 | -0.25 |
//! | Facilitator consecutive slots | adjacent distinct slots | +0.5 |
//! | ... crossing specific rooms | exactly two activities, one in a specific room | -0.4 |

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Catalog, CrossGroupRoomCheck, FacilitatorFit, Schedule};

/// Fitness split by rule family. [`total`](Self::total) is the schedule's fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessBreakdown {
    /// Room capacity versus enrollment.
    pub room_size: f64,
    /// Facilitator preference tiers.
    pub facilitator_preference: f64,
    /// Rooms booked more than once in a slot.
    pub room_conflicts: f64,
    /// Facilitators booked once or more than once per slot.
    pub facilitator_slot_load: f64,
    /// Facilitator totals across the schedule.
    pub facilitator_total_load: f64,
    /// Two-section lecture group rules.
    pub lecture_sections: f64,
    /// Paired lecture group proximity.
    pub paired_groups: f64,
    /// Facilitators teaching back-to-back slots.
    pub consecutive_slots: f64,
}

impl FitnessBreakdown {
    /// Sum of all rule families.
    pub fn total(&self) -> f64 {
        self.room_size
            + self.facilitator_preference
            + self.room_conflicts
            + self.facilitator_slot_load
            + self.facilitator_total_load
            + self.lecture_sections
            + self.paired_groups
            + self.consecutive_slots
    }
}

/// Scores schedules against a catalog.
///
/// Name lookups (preferences, specific rooms, groups) are resolved to
/// indices once at construction; [`evaluate`](Self::evaluate) only does
/// counting. The evaluator holds no mutable state and is `Sync`.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_timetable::ga::FitnessEvaluator;
/// use u_timetable::models::{Catalog, Schedule};
///
/// let catalog = Catalog::builtin();
/// let evaluator = FitnessEvaluator::new(&catalog);
/// let schedule = Schedule::random(&catalog, &mut SmallRng::seed_from_u64(1));
/// assert!(evaluator.evaluate(&schedule).is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    catalog: &'a Catalog,
    /// `fit[activity][facilitator]`.
    fit: Vec<Vec<FacilitatorFit>>,
    /// `specific_room[room]`.
    specific_room: Vec<bool>,
    load_exempt: Option<usize>,
    /// Activity indices per lecture group.
    lecture_sections: Vec<Vec<usize>>,
    paired_sections: Option<(Vec<usize>, Vec<usize>)>,
    cross_group_room_check: CrossGroupRoomCheck,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator for a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        let rules = &catalog.rules;

        let fit = catalog
            .activities
            .iter()
            .map(|act| {
                catalog
                    .facilitators
                    .iter()
                    .map(|f| act.facilitator_fit(f.name()))
                    .collect()
            })
            .collect();

        let specific_room = catalog
            .rooms
            .iter()
            .map(|r| rules.specific_rooms.contains(&r.name))
            .collect();

        let load_exempt = rules
            .load_exempt_facilitator
            .as_deref()
            .and_then(|name| catalog.facilitator_index(name));

        let mut lecture_sections = vec![Vec::new(); rules.lecture_groups.len()];
        for (i, act) in catalog.activities.iter().enumerate() {
            if let Some(g) = rules
                .lecture_groups
                .iter()
                .position(|base| act.name.starts_with(base.as_str()))
            {
                lecture_sections[g].push(i);
            }
        }

        let sections_of = |base: &str| -> Vec<usize> {
            catalog
                .activities
                .iter()
                .enumerate()
                .filter(|(_, act)| act.name.starts_with(base))
                .map(|(i, _)| i)
                .collect()
        };
        let paired_sections = rules
            .paired_groups
            .as_ref()
            .map(|(a, b)| (sections_of(a.as_str()), sections_of(b.as_str())));

        Self {
            catalog,
            fit,
            specific_room,
            load_exempt,
            lecture_sections,
            paired_sections,
            cross_group_room_check: rules.cross_group_room_check,
        }
    }

    /// Computes the fitness of a schedule.
    ///
    /// The schedule must be valid for this evaluator's catalog
    /// (see [`Schedule::is_valid`]).
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        self.evaluate_detailed(schedule).total()
    }

    /// Computes the fitness of a schedule, split by rule family.
    pub fn evaluate_detailed(&self, schedule: &Schedule) -> FitnessBreakdown {
        debug_assert!(schedule.is_valid(self.catalog));

        let n_rooms = self.catalog.rooms.len();
        let n_slots = self.catalog.time_slots.len();
        let n_facs = self.catalog.facilitators.len();

        // Occupancy counts, indexed [slot * width + item].
        let mut room_use = vec![0u32; n_slots * n_rooms];
        let mut facilitator_use = vec![0u32; n_slots * n_facs];
        let mut facilitator_load = vec![0u32; n_facs];

        let mut b = FitnessBreakdown::default();

        for a in &schedule.assignments {
            let act = &self.catalog.activities[a.activity];
            let capacity = self.catalog.rooms[a.room].capacity;
            b.room_size += room_size_delta(capacity, act.expected_enrollment);
            b.facilitator_preference += match self.fit[a.activity][a.facilitator] {
                FacilitatorFit::Preferred => 0.5,
                FacilitatorFit::Acceptable => 0.2,
                FacilitatorFit::Unsuitable => -0.1,
            };

            room_use[a.time_slot * n_rooms + a.room] += 1;
            facilitator_use[a.time_slot * n_facs + a.facilitator] += 1;
            facilitator_load[a.facilitator] += 1;
        }

        let double_booked = room_use.iter().filter(|&&c| c > 1).count();
        b.room_conflicts = -0.5 * double_booked as f64;

        for &count in &facilitator_use {
            match count {
                0 => {}
                1 => b.facilitator_slot_load += 0.2,
                _ => b.facilitator_slot_load -= 0.2,
            }
        }

        for (f, &load) in facilitator_load.iter().enumerate() {
            if load > 4 {
                b.facilitator_total_load -= 0.5;
            } else if (load == 1 || load == 2) && self.load_exempt != Some(f) {
                b.facilitator_total_load -= 0.4;
            }
        }

        b.lecture_sections = self.lecture_section_score(schedule);
        b.paired_groups = self.paired_group_score(schedule);
        b.consecutive_slots = self.consecutive_slot_score(schedule, &facilitator_use);

        b
    }

    fn lecture_section_score(&self, schedule: &Schedule) -> f64 {
        let mut score = 0.0;
        for sections in &self.lecture_sections {
            let [first, second] = sections.as_slice() else {
                continue;
            };
            let s1 = schedule.assignments[*first].time_slot;
            let s2 = schedule.assignments[*second].time_slot;
            if s1 == s2 {
                score -= 0.5;
            } else if s1.abs_diff(s2) > 4 {
                score += 0.5;
            }
        }
        score
    }

    fn paired_group_score(&self, schedule: &Schedule) -> f64 {
        let Some((group_a, group_b)) = &self.paired_sections else {
            return 0.0;
        };

        let mut score = 0.0;
        for &ia in group_a {
            let a = &schedule.assignments[ia];
            for &ib in group_b {
                let b = &schedule.assignments[ib];
                match a.time_slot.abs_diff(b.time_slot) {
                    0 => score -= 0.25,
                    1 => {
                        score += 0.5;
                        if self.crosses_specific_rooms(a, b) {
                            score -= 0.4;
                        }
                    }
                    2 => score += 0.25,
                    _ => {}
                }
            }
        }
        score
    }

    fn crosses_specific_rooms(&self, a: &Assignment, b: &Assignment) -> bool {
        let a_in = self.specific_room[a.room];
        let b_in = self.specific_room[b.room];
        match self.cross_group_room_check {
            CrossGroupRoomCheck::FirstGroupOnly => a_in && !b_in,
            CrossGroupRoomCheck::Symmetric => a_in != b_in,
        }
    }

    fn consecutive_slot_score(&self, schedule: &Schedule, facilitator_use: &[u32]) -> f64 {
        let n_slots = self.catalog.time_slots.len();
        let n_facs = self.catalog.facilitators.len();

        let mut score = 0.0;
        for f in 0..n_facs {
            let taught: Vec<usize> = (0..n_slots)
                .filter(|&t| facilitator_use[t * n_facs + f] > 0)
                .collect();

            for pair in taught.windows(2) {
                let (s1, s2) = (pair[0], pair[1]);
                if s2 - s1 != 1 {
                    continue;
                }
                score += 0.5;

                let in_pair: Vec<&Assignment> = schedule
                    .assignments_for_facilitator(f)
                    .filter(|a| a.time_slot == s1 || a.time_slot == s2)
                    .collect();
                if let [x, y] = in_pair.as_slice() {
                    if self.specific_room[x.room] != self.specific_room[y.room] {
                        score -= 0.4;
                    }
                }
            }
        }
        score
    }
}

/// Room capacity delta for one activity.
fn room_size_delta(capacity: u32, enrollment: u32) -> f64 {
    let capacity = u64::from(capacity);
    let enrollment = u64::from(enrollment);
    if capacity < enrollment {
        -0.5
    } else if capacity > 6 * enrollment {
        -0.4
    } else if capacity > 3 * enrollment {
        -0.2
    } else {
        0.3
    }
}
