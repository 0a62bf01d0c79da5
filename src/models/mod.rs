//! Timetabling domain models.
//!
//! Provides the read-only catalogs that describe a department and the
//! candidate [`Schedule`] the optimizer evolves.
//!
//! # Domain Mappings
//!
//! | u-timetable | Course timetabling | Meaning |
//! |-------------|--------------------|---------|
//! | Activity | Course section | What is scheduled |
//! | Room | Classroom | Where, with a seat capacity |
//! | TimeSlot | Teaching hour | When, ordered |
//! | Facilitator | Instructor | Who teaches |
//! | Schedule | Timetable | One assignment per activity |

mod activity;
mod catalog;
mod schedule;

pub use activity::{Activity, FacilitatorFit};
pub use catalog::{Catalog, CrossGroupRoomCheck, Facilitator, Room, ScoringRules, TimeSlot};
pub use schedule::{Assignment, Schedule};
