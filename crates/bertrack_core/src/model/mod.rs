//! Domain model for BER case management.
//!
//! # Responsibility
//! - Define the canonical entities: reports, reminders, audit events and
//!   the asserted session identity.
//! - Provide draft (input) models and their edge-side validation.
//!
//! # Invariants
//! - Every entity is identified by a stable `EntityId`.
//! - Audit events are immutable once constructed.
//! - Reminder overdue/pending status is derived at read time, never stored.

use std::error::Error;
use std::fmt::{Display, Formatter};

use uuid::Uuid;

pub mod audit;
pub mod reminder;
pub mod report;
pub mod session;

/// Stable identifier for every domain entity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = Uuid;

/// Validation error for draft (input) models.
///
/// Detected by the presentation layer before invoking a domain operation;
/// the operations themselves accept any draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValidationError {
    /// One or more required fields are empty.
    MissingFields(Vec<&'static str>),
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
        }
    }
}

impl Error for DraftValidationError {}

pub(crate) fn require_non_empty(
    checks: &[(&'static str, &str)],
) -> Result<(), DraftValidationError> {
    let missing: Vec<&'static str> = checks
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DraftValidationError::MissingFields(missing))
    }
}
