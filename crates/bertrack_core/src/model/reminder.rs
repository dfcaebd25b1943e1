//! Compliance reminder model and read-time status normalization.
//!
//! # Responsibility
//! - Define the standalone due-date-tracked reminder record.
//! - Derive the effective pending/overdue/complete status on every read.
//!
//! # Invariants
//! - Stored status is only ever `pending` or `complete`; `overdue` is a
//!   live recomputation and is never persisted.
//! - Completion is one-way; there is no un-complete operation.
//! - `related_report_id` is a weak reference; dangling ids are tolerated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::session::UserRole;
use crate::model::{require_non_empty, DraftValidationError, EntityId};

/// Reminder lifecycle state as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Complete,
    Overdue,
}

/// Standalone compliance task, optionally linked to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReminder {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub status: ReminderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_report_id: Option<EntityId>,
    pub owner_role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl ComplianceReminder {
    /// Effective status at `now`: complete passes through unchanged;
    /// otherwise overdue iff the due date is strictly before `now`.
    pub fn effective_status(&self, now: DateTime<Utc>) -> ReminderStatus {
        if self.status == ReminderStatus::Complete {
            ReminderStatus::Complete
        } else if self.due_date < now {
            ReminderStatus::Overdue
        } else {
            ReminderStatus::Pending
        }
    }
}

/// Input model for manual reminder creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_report_id: Option<EntityId>,
    pub owner_role: UserRole,
}

impl ReminderDraft {
    /// Edge-side validation: the title must be non-empty. The due date is
    /// required by the type.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_non_empty(&[("title", &self.title)])
    }
}

/// Read-time transform over a reminder collection: replaces each stored
/// status with the effective status at `now`. Pure; the stored collection
/// is left untouched.
pub fn normalize_reminders(
    reminders: &[ComplianceReminder],
    now: DateTime<Utc>,
) -> Vec<ComplianceReminder> {
    reminders
        .iter()
        .map(|reminder| {
            let status = reminder.effective_status(now);
            if status == reminder.status {
                reminder.clone()
            } else {
                ComplianceReminder {
                    status,
                    ..reminder.clone()
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_reminders, ComplianceReminder, ReminderStatus};
    use crate::model::session::UserRole;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn reminder(offset_hours: i64, status: ReminderStatus) -> ComplianceReminder {
        let now = Utc::now();
        ComplianceReminder {
            id: Uuid::new_v4(),
            title: "Submit BER to District Office".to_string(),
            description: "Submission due within 2 school days.".to_string(),
            due_date: now + Duration::hours(offset_hours),
            status,
            related_report_id: None,
            owner_role: UserRole::ProgramSpecialist,
            created_at: now,
        }
    }

    #[test]
    fn pending_reminder_past_due_reads_as_overdue() {
        let reminder = reminder(-2, ReminderStatus::Pending);
        assert_eq!(
            reminder.effective_status(Utc::now()),
            ReminderStatus::Overdue
        );
    }

    #[test]
    fn pending_reminder_before_due_stays_pending() {
        let reminder = reminder(2, ReminderStatus::Pending);
        assert_eq!(
            reminder.effective_status(Utc::now()),
            ReminderStatus::Pending
        );
    }

    #[test]
    fn complete_reminder_ignores_due_date() {
        let reminder = reminder(-48, ReminderStatus::Complete);
        assert_eq!(
            reminder.effective_status(Utc::now()),
            ReminderStatus::Complete
        );
    }

    #[test]
    fn normalization_does_not_touch_stored_values() {
        let stored = vec![
            reminder(-2, ReminderStatus::Pending),
            reminder(2, ReminderStatus::Pending),
        ];
        let normalized = normalize_reminders(&stored, Utc::now());

        assert_eq!(normalized[0].status, ReminderStatus::Overdue);
        assert_eq!(normalized[1].status, ReminderStatus::Pending);
        assert_eq!(stored[0].status, ReminderStatus::Pending);
    }
}
