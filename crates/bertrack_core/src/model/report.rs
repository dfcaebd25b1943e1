//! Behavior Emergency Report (BER) model.
//!
//! # Responsibility
//! - Define the central incident record and its follow-up checklist.
//! - Materialize new reports from edge-submitted drafts.
//!
//! # Invariants
//! - `status` only holds the five enumerated lifecycle values; any value
//!   may follow any other.
//! - `follow_up_actions` order is insertion order and display-significant;
//!   the index is the addressing key for toggling.
//! - Reports are never deleted.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{require_non_empty, DraftValidationError, EntityId};

/// Report lifecycle state.
///
/// Serialized as the display strings used by the stored dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Draft,
    Submitted,
    #[serde(rename = "Under Review")]
    UnderReview,
    #[serde(rename = "Follow-up Scheduled")]
    FollowUpScheduled,
    Closed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::FollowUpScheduled => "Follow-up Scheduled",
            Self::Closed => "Closed",
        }
    }
}

impl Display for ReportStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete checklist item attached to a report.
///
/// Identity is positional: the index within the parent report's sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpAction {
    pub label: String,
    pub completed: bool,
    /// Set exactly when `completed` transitions true; cleared when it
    /// transitions false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<DateTime<Utc>>,
}

impl FollowUpAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            completed: false,
            completed_on: None,
        }
    }
}

/// The central incident record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEmergencyReport {
    pub id: EntityId,
    pub student_name: String,
    pub student_id: String,
    pub grade_level: String,
    pub guardian_contacted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_contacted_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_contact_method: Option<String>,
    pub site: String,
    pub district: String,
    pub location: String,
    pub incident_date: NaiveDate,
    pub incident_time: NaiveTime,
    pub precipitating_factors: String,
    pub incident_description: String,
    pub interventions_attempted: String,
    pub physical_intervention_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_intervention_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restraint_duration_minutes: Option<u32>,
    pub injuries_reported: bool,
    pub medical_follow_up_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_due_date: Option<DateTime<Utc>>,
    pub follow_up_actions: Vec<FollowUpAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_specialist_assigned: Option<String>,
    pub status: ReportStatus,
    pub debrief_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debrief_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

/// Input model for report creation: every report field except identity,
/// timestamps and provenance, with the status optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub student_name: String,
    pub student_id: String,
    pub grade_level: String,
    pub guardian_contacted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_contacted_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guardian_contact_method: Option<String>,
    pub site: String,
    pub district: String,
    pub location: String,
    pub incident_date: NaiveDate,
    pub incident_time: NaiveTime,
    pub precipitating_factors: String,
    pub incident_description: String,
    pub interventions_attempted: String,
    pub physical_intervention_used: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_intervention_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restraint_duration_minutes: Option<u32>,
    pub injuries_reported: bool,
    pub medical_follow_up_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub follow_up_actions: Vec<FollowUpAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_specialist_assigned: Option<String>,
    /// Defaults to `Submitted` at materialization when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    pub debrief_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debrief_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

impl ReportDraft {
    /// Edge-side validation matching the report form's required fields.
    ///
    /// `create_report` itself accepts any draft.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_non_empty(&[
            ("studentName", &self.student_name),
            ("studentId", &self.student_id),
            ("site", &self.site),
            ("location", &self.location),
            ("incidentDescription", &self.incident_description),
        ])
    }

    /// Builds the stored report from this draft.
    ///
    /// # Contract
    /// - `created_at == updated_at == now`.
    /// - `created_by == updated_by == actor`.
    /// - Status falls back to `Submitted` when the draft carries none.
    pub fn materialize(
        self,
        id: EntityId,
        now: DateTime<Utc>,
        actor: &str,
    ) -> BehaviorEmergencyReport {
        BehaviorEmergencyReport {
            id,
            student_name: self.student_name,
            student_id: self.student_id,
            grade_level: self.grade_level,
            guardian_contacted: self.guardian_contacted,
            guardian_contacted_on: self.guardian_contacted_on,
            guardian_contact_method: self.guardian_contact_method,
            site: self.site,
            district: self.district,
            location: self.location,
            incident_date: self.incident_date,
            incident_time: self.incident_time,
            precipitating_factors: self.precipitating_factors,
            incident_description: self.incident_description,
            interventions_attempted: self.interventions_attempted,
            physical_intervention_used: self.physical_intervention_used,
            physical_intervention_type: self.physical_intervention_type,
            restraint_duration_minutes: self.restraint_duration_minutes,
            injuries_reported: self.injuries_reported,
            medical_follow_up_required: self.medical_follow_up_required,
            follow_up_due_date: self.follow_up_due_date,
            follow_up_actions: self.follow_up_actions,
            behavior_specialist_assigned: self.behavior_specialist_assigned,
            status: self.status.unwrap_or(ReportStatus::Submitted),
            debrief_completed: self.debrief_completed,
            debrief_notes: self.debrief_notes,
            created_at: now,
            updated_at: now,
            created_by: actor.to_string(),
            updated_by: actor.to_string(),
            reviewed_by: self.reviewed_by,
        }
    }
}
