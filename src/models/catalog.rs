//! Reference catalogs and scoring rules.
//!
//! A [`Catalog`] bundles everything a run treats as read-only input:
//! rooms, the ordered time slots, facilitators, activities, and the
//! department-specific [`ScoringRules`].
//!
//! # Ordering
//!
//! Catalog order is significant. Time slot order defines the "distance"
//! used by proximity rules, and assignments store catalog indices.

use serde::{Deserialize, Serialize};

use super::Activity;

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room name (e.g., "Roman 216").
    pub name: String,
    /// Seat count.
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// A time slot label. Position in [`Catalog::time_slots`] is its index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(pub String);

impl TimeSlot {
    /// Slot label.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TimeSlot {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// A facilitator (instructor) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facilitator(pub String);

impl Facilitator {
    /// Facilitator name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Facilitator {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Which side of a paired-group section pair is checked for the
/// specific-room penalty.
///
/// Historically only the first group's section was tested against the
/// specific room subset; the mirrored test compared the wrong value and
/// could never fire. `FirstGroupOnly` keeps that observable behavior,
/// `Symmetric` applies the test in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossGroupRoomCheck {
    /// Penalize only when the first group's section is in a specific room
    /// and the second group's is not.
    #[default]
    FirstGroupOnly,
    /// Penalize whenever exactly one of the two sections is in a specific room.
    Symmetric,
}

/// Department-specific knobs consumed by the fitness evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Facilitator exempt from the low-load penalty.
    pub load_exempt_facilitator: Option<String>,
    /// Rooms that are penalized when adjacent slots cross in and out of them.
    pub specific_rooms: Vec<String>,
    /// Lecture group base names. An activity joins the first group whose
    /// base name is a prefix of the activity name.
    pub lecture_groups: Vec<String>,
    /// Two lecture groups scored against each other for slot proximity.
    pub paired_groups: Option<(String, String)>,
    /// Direction of the specific-room check in the paired-group rule.
    pub cross_group_room_check: CrossGroupRoomCheck,
}

/// Read-only input catalogs for a timetabling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Rooms, in catalog order.
    pub rooms: Vec<Room>,
    /// Ordered time slots.
    pub time_slots: Vec<TimeSlot>,
    /// Facilitators, in catalog order.
    pub facilitators: Vec<Facilitator>,
    /// Activities; a schedule holds one assignment per entry, by position.
    pub activities: Vec<Activity>,
    /// Scoring rules.
    #[serde(default)]
    pub rules: ScoringRules,
}

impl Catalog {
    /// Creates a catalog with default (empty) scoring rules.
    pub fn new(
        rooms: Vec<Room>,
        time_slots: Vec<TimeSlot>,
        facilitators: Vec<Facilitator>,
        activities: Vec<Activity>,
    ) -> Self {
        Self {
            rooms,
            time_slots,
            facilitators,
            activities,
            rules: ScoringRules::default(),
        }
    }

    /// Sets the scoring rules.
    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    /// Number of activities (and therefore assignments per schedule).
    #[inline]
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Index of a facilitator by name.
    pub fn facilitator_index(&self, name: &str) -> Option<usize> {
        self.facilitators.iter().position(|f| f.0 == name)
    }

    /// The SLA department catalog the optimizer was built for.
    pub fn builtin() -> Self {
        let rooms = vec![
            Room::new("Slater 003", 45),
            Room::new("Roman 216", 30),
            Room::new("Loft 206", 75),
            Room::new("Roman 201", 50),
            Room::new("Loft 310", 108),
            Room::new("Beach 201", 60),
            Room::new("Beach 301", 75),
            Room::new("Logos 325", 450),
            Room::new("Frank 119", 60),
        ];
        let time_slots = ["10 AM", "11 AM", "12 PM", "1 PM", "2 PM", "3 PM"]
            .into_iter()
            .map(TimeSlot::from)
            .collect();
        let facilitators = [
            "Lock", "Glen", "Banks", "Richards", "Shaw", "Singer", "Uther", "Tyler", "Numen",
            "Zeldin",
        ]
        .into_iter()
        .map(Facilitator::from)
        .collect();

        let intro = |name: &str| {
            Activity::new(name, 50)
                .with_preferred(["Glen", "Lock", "Banks", "Zeldin"])
                .with_other(["Numen", "Richards"])
        };
        let activities = vec![
            intro("SLA101A"),
            intro("SLA101B"),
            intro("SLA191A"),
            intro("SLA191B"),
            Activity::new("SLA201", 50)
                .with_preferred(["Glen", "Banks", "Zeldin", "Shaw"])
                .with_other(["Numen", "Richards", "Singer"]),
            Activity::new("SLA291", 50)
                .with_preferred(["Lock", "Banks", "Zeldin", "Singer"])
                .with_other(["Numen", "Richards", "Shaw", "Tyler"]),
            Activity::new("SLA303", 60)
                .with_preferred(["Glen", "Zeldin", "Banks"])
                .with_other(["Numen", "Singer", "Shaw"]),
            Activity::new("SLA304", 25)
                .with_preferred(["Glen", "Banks", "Tyler"])
                .with_other(["Numen", "Singer", "Shaw", "Richards", "Uther", "Zeldin"]),
            Activity::new("SLA394", 20)
                .with_preferred(["Tyler", "Singer"])
                .with_other(["Richards", "Zeldin"]),
            Activity::new("SLA449", 50)
                .with_preferred(["Tyler", "Singer", "Shaw"])
                .with_other(["Zeldin", "Uther"]),
            Activity::new("SLA451", 100)
                .with_preferred(["Tyler", "Singer", "Shaw"])
                .with_other(["Zeldin", "Uther", "Richards", "Banks"]),
        ];

        let rules = ScoringRules {
            load_exempt_facilitator: Some("Tyler".into()),
            specific_rooms: ["Roman 216", "Roman 201", "Beach 201", "Beach 301"]
                .into_iter()
                .map(String::from)
                .collect(),
            lecture_groups: vec!["SLA101".into(), "SLA191".into()],
            paired_groups: Some(("SLA101".into(), "SLA191".into())),
            cross_group_room_check: CrossGroupRoomCheck::FirstGroupOnly,
        };

        Self::new(rooms, time_slots, facilitators, activities).with_rules(rules)
    }
}
