//! Input validation for timetabling runs.
//!
//! Checks catalogs and hyperparameters before the first generation.
//! Detects:
//! - Empty catalogs
//! - Duplicate names
//! - Non-positive enrollments
//! - References to unknown facilitators, rooms or lecture groups
//! - Out-of-range hyperparameters
//!
//! Every problem is collected; nothing stops at the first error.

use std::collections::HashSet;
use std::fmt;

use crate::ga::EvolutionConfig;
use crate::models::Catalog;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A catalog (rooms, slots, facilitators, activities) is empty.
    EmptyCatalog,
    /// Two catalog entries share the same name.
    DuplicateName,
    /// A catalog value is out of its domain (e.g., zero enrollment).
    InvalidValue,
    /// A facilitator name does not exist in the catalog.
    UnknownFacilitator,
    /// A room name does not exist in the catalog.
    UnknownRoom,
    /// A lecture or paired group base name matches no activity.
    UnknownGroup,
    /// A hyperparameter is out of range.
    InvalidHyperparameter,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Configuration rejected before a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// All detected problems.
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration ({} problem(s))", self.errors.len())?;
        for err in &self.errors {
            write!(f, "\n  - {}", err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

/// Validates a catalog.
///
/// Checks:
/// 1. Rooms, time slots, facilitators and activities are non-empty
/// 2. No duplicate names within any catalog
/// 3. Every activity expects at least one student
/// 4. Preference lists name known facilitators
/// 5. The load-exempt facilitator exists
/// 6. Every specific room exists
/// 7. Every lecture group and paired group prefixes at least one activity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let sections = [
        ("room", catalog.rooms.is_empty()),
        ("time slot", catalog.time_slots.is_empty()),
        ("facilitator", catalog.facilitators.is_empty()),
        ("activity", catalog.activities.is_empty()),
    ];
    for (what, empty) in sections {
        if empty {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCatalog,
                format!("The {what} catalog is empty"),
            ));
        }
    }

    check_duplicates("room", catalog.rooms.iter().map(|r| r.name.as_str()), &mut errors);
    check_duplicates(
        "time slot",
        catalog.time_slots.iter().map(|t| t.label()),
        &mut errors,
    );
    check_duplicates(
        "facilitator",
        catalog.facilitators.iter().map(|f| f.name()),
        &mut errors,
    );
    check_duplicates(
        "activity",
        catalog.activities.iter().map(|a| a.name.as_str()),
        &mut errors,
    );

    let facilitators: HashSet<&str> = catalog.facilitators.iter().map(|f| f.name()).collect();
    let rooms: HashSet<&str> = catalog.rooms.iter().map(|r| r.name.as_str()).collect();

    for act in &catalog.activities {
        if act.expected_enrollment == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidValue,
                format!("Activity '{}' has zero expected enrollment", act.name),
            ));
        }
        for name in act.preferred_facilitators.iter().chain(&act.other_facilitators) {
            if !facilitators.contains(name.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownFacilitator,
                    format!(
                        "Activity '{}' references unknown facilitator '{}'",
                        act.name, name
                    ),
                ));
            }
        }
    }

    if let Some(exempt) = &catalog.rules.load_exempt_facilitator {
        if !facilitators.contains(exempt.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFacilitator,
                format!("Load-exempt facilitator '{exempt}' is not in the catalog"),
            ));
        }
    }

    for room in &catalog.rules.specific_rooms {
        if !rooms.contains(room.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownRoom,
                format!("Specific room '{room}' is not in the catalog"),
            ));
        }
    }

    let paired = catalog
        .rules
        .paired_groups
        .iter()
        .flat_map(|(a, b)| [a, b]);
    for (what, base) in catalog
        .rules
        .lecture_groups
        .iter()
        .map(|g| ("Lecture", g))
        .chain(paired.map(|g| ("Paired", g)))
    {
        let matched = catalog
            .activities
            .iter()
            .any(|act| act.name.starts_with(base.as_str()));
        if !matched {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                format!("{what} group '{base}' matches no activity"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates evolution hyperparameters.
///
/// Checks:
/// 1. `population_size >= 4`, so the mating half holds two distinct parents
/// 2. `max_generations > 0`
/// 3. `mutation_rate` in `[0, 1]`
/// 4. `convergence_threshold` finite and non-negative
pub fn validate_config(config: &EvolutionConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.population_size < 4 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHyperparameter,
            format!(
                "population_size must be at least 4, got {}",
                config.population_size
            ),
        ));
    }
    if config.max_generations == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHyperparameter,
            "max_generations must be positive",
        ));
    }
    if !(0.0..=1.0).contains(&config.mutation_rate) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHyperparameter,
            format!(
                "mutation_rate must be within [0, 1], got {}",
                config.mutation_rate
            ),
        ));
    }
    if !config.convergence_threshold.is_finite() || config.convergence_threshold < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHyperparameter,
            format!(
                "convergence_threshold must be finite and non-negative, got {}",
                config.convergence_threshold
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_duplicates<'a>(
    what: &str,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate {what} name: {name}"),
            ));
        }
    }
}
