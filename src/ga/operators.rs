//! Reproduction operators for timetable schedules.
//!
//! Provides uniform gene-wise crossover and single-field mutation, wrapped
//! by [`Reproduction`] for use in the evolution loop.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_timetable::ga::operators::Reproduction;
//! use u_timetable::models::{Catalog, Schedule};
//!
//! let catalog = Catalog::builtin();
//! let mut rng = SmallRng::seed_from_u64(42);
//! let p1 = Schedule::random(&catalog, &mut rng);
//! let p2 = Schedule::random(&catalog, &mut rng);
//!
//! let reproduction = Reproduction::new(&catalog, 0.01);
//! let (c1, c2) = reproduction.reproduce(&p1, &p2, &mut rng);
//! assert!(c1.is_valid(&catalog) && c2.is_valid(&catalog));
//! ```

use rand::Rng;

use crate::models::{Assignment, Catalog, Schedule};

/// Field of an assignment replaced by mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationField {
    /// Redraw the room.
    Room,
    /// Redraw the time slot.
    TimeSlot,
    /// Redraw the facilitator.
    Facilitator,
}

impl MutationField {
    const ALL: [MutationField; 3] = [Self::Room, Self::TimeSlot, Self::Facilitator];

    /// Picks a field uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Uniform crossover.
///
/// Each child takes each gene from parent 1 or parent 2 with equal
/// probability, using its own independent coin flips. Genes stay in
/// position, so every child keeps one assignment per activity.
pub fn uniform_crossover<R: Rng>(
    p1: &Schedule,
    p2: &Schedule,
    rng: &mut R,
) -> (Schedule, Schedule) {
    debug_assert_eq!(p1.len(), p2.len());
    let mut child = || {
        let assignments = p1
            .assignments
            .iter()
            .zip(&p2.assignments)
            .map(|(a, b)| if rng.random_bool(0.5) { *a } else { *b })
            .collect();
        Schedule::from_assignments(assignments)
    };
    let c1 = child();
    let c2 = child();
    (c1, c2)
}

/// Replaces one field of an assignment with a fresh uniform draw.
///
/// The activity index and the other two fields are left untouched.
/// Returns the field that was redrawn (the new value may equal the old one).
pub fn mutate_assignment<R: Rng>(
    assignment: &mut Assignment,
    catalog: &Catalog,
    rng: &mut R,
) -> MutationField {
    let field = MutationField::random(rng);
    match field {
        MutationField::Room => assignment.room = rng.random_range(0..catalog.rooms.len()),
        MutationField::TimeSlot => {
            assignment.time_slot = rng.random_range(0..catalog.time_slots.len())
        }
        MutationField::Facilitator => {
            assignment.facilitator = rng.random_range(0..catalog.facilitators.len())
        }
    }
    field
}

/// Per-assignment mutation.
///
/// Each assignment is mutated independently with probability `rate`.
/// Returns the number of assignments mutated.
pub fn mutate<R: Rng>(
    schedule: &mut Schedule,
    catalog: &Catalog,
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut mutated = 0;
    for assignment in &mut schedule.assignments {
        if rng.random_bool(rate) {
            mutate_assignment(assignment, catalog, rng);
            mutated += 1;
        }
    }
    mutated
}

/// Crossover followed by mutation, bound to a catalog and mutation rate.
#[derive(Debug, Clone)]
pub struct Reproduction<'a> {
    catalog: &'a Catalog,
    /// Probability that an assignment has one field redrawn.
    pub mutation_rate: f64,
}

impl<'a> Reproduction<'a> {
    /// Creates a reproduction operator.
    ///
    /// `mutation_rate` must lie within `[0, 1]`.
    pub fn new(catalog: &'a Catalog, mutation_rate: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&mutation_rate));
        Self {
            catalog,
            mutation_rate,
        }
    }

    /// Produces two children from two parents.
    pub fn reproduce<R: Rng>(
        &self,
        p1: &Schedule,
        p2: &Schedule,
        rng: &mut R,
    ) -> (Schedule, Schedule) {
        let (mut c1, mut c2) = uniform_crossover(p1, p2, rng);
        mutate(&mut c1, self.catalog, self.mutation_rate, rng);
        mutate(&mut c2, self.catalog, self.mutation_rate, rng);
        (c1, c2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn parents(catalog: &Catalog, rng: &mut SmallRng) -> (Schedule, Schedule) {
        (Schedule::random(catalog, rng), Schedule::random(catalog, rng))
    }

    #[test]
    fn test_crossover_preserves_positions() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let (p1, p2) = parents(&cat, &mut rng);
            let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng);
            assert!(c1.is_valid(&cat));
            assert!(c2.is_valid(&cat));
        }
    }

    #[test]
    fn test_crossover_genes_come_from_parents() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(5);
        let (p1, p2) = parents(&cat, &mut rng);
        let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng);
        for child in [&c1, &c2] {
            for (i, gene) in child.assignments.iter().enumerate() {
                assert!(*gene == p1.assignments[i] || *gene == p2.assignments[i]);
            }
        }
    }

    #[test]
    fn test_crossover_mixes_both_parents() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(11);
        let p1 = Schedule::from_assignments(
            (0..cat.activity_count()).map(|i| Assignment::new(i, 0, 0, 0)).collect(),
        );
        let p2 = Schedule::from_assignments(
            (0..cat.activity_count()).map(|i| Assignment::new(i, 1, 1, 1)).collect(),
        );
        let mut from_p1 = 0;
        let mut from_p2 = 0;
        for _ in 0..20 {
            let (c1, _) = uniform_crossover(&p1, &p2, &mut rng);
            for gene in &c1.assignments {
                if gene.room == 0 {
                    from_p1 += 1;
                } else {
                    from_p2 += 1;
                }
            }
        }
        assert!(from_p1 > 0 && from_p2 > 0);
    }

    #[test]
    fn test_zero_mutation_rate_keeps_crossover_genes() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(42);
        let reproduction = Reproduction::new(&cat, 0.0);
        for _ in 0..20 {
            let (p1, p2) = parents(&cat, &mut rng);
            let (c1, c2) = reproduction.reproduce(&p1, &p2, &mut rng);
            for child in [&c1, &c2] {
                for (i, gene) in child.assignments.iter().enumerate() {
                    assert!(*gene == p1.assignments[i] || *gene == p2.assignments[i]);
                }
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_rejects_out_of_range_mutation_rate() {
        let cat = Catalog::builtin();
        let _ = Reproduction::new(&cat, 1.5);
    }

    #[test]
    fn test_zero_mutation_rate_identical_parents() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(8);
        let p = Schedule::random(&cat, &mut rng);
        let (c1, c2) = Reproduction::new(&cat, 0.0).reproduce(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    fn test_full_mutation_changes_at_most_one_field() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(42);
        let p = Schedule::random(&cat, &mut rng);
        let (c1, c2) = Reproduction::new(&cat, 1.0).reproduce(&p, &p, &mut rng);
        for child in [&c1, &c2] {
            assert!(child.is_valid(&cat));
            for (gene, orig) in child.assignments.iter().zip(&p.assignments) {
                let changed = [
                    gene.room != orig.room,
                    gene.time_slot != orig.time_slot,
                    gene.facilitator != orig.facilitator,
                ]
                .iter()
                .filter(|&&c| c)
                .count();
                assert!(changed <= 1);
                assert_eq!(gene.activity, orig.activity);
            }
        }
    }

    #[test]
    fn test_mutate_assignment_touches_only_chosen_field() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(17);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let orig = Assignment::new(4, 2, 3, 5);
            let mut gene = orig;
            let field = mutate_assignment(&mut gene, &cat, &mut rng);
            assert_eq!(gene.activity, orig.activity);
            match field {
                MutationField::Room => {
                    seen[0] = true;
                    assert_eq!(
                        (gene.time_slot, gene.facilitator),
                        (orig.time_slot, orig.facilitator)
                    );
                }
                MutationField::TimeSlot => {
                    seen[1] = true;
                    assert_eq!((gene.room, gene.facilitator), (orig.room, orig.facilitator));
                }
                MutationField::Facilitator => {
                    seen[2] = true;
                    assert_eq!((gene.room, gene.time_slot), (orig.room, orig.time_slot));
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "all three fields should be chosen");
    }

    #[test]
    fn test_mutate_counts() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = Schedule::random(&cat, &mut rng);
        assert_eq!(mutate(&mut s, &cat, 0.0, &mut rng), 0);
        assert_eq!(mutate(&mut s, &cat, 1.0, &mut rng), cat.activity_count());
        assert!(s.is_valid(&cat));
    }

    #[test]
    fn test_children_do_not_alias_parents() {
        let cat = Catalog::builtin();
        let mut rng = SmallRng::seed_from_u64(21);
        let p = Schedule::random(&cat, &mut rng);
        let snapshot = p.clone();
        let (mut c1, _) = Reproduction::new(&cat, 0.0).reproduce(&p, &p, &mut rng);
        mutate(&mut c1, &cat, 1.0, &mut rng);
        assert_eq!(p, snapshot);
    }
}
