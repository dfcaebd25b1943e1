//! First-run seed dataset.
//!
//! # Responsibility
//! - Provide the fixed default collections written on first launch so the
//!   presentation layer never starts from an empty screen.
//!
//! # Invariants
//! - Seed reminders and audit entries reference seed report ids; the
//!   cross-links are wired here, in one place.
//! - Timestamps are relative to the generation instant.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use uuid::Uuid;

use crate::model::audit::{AuditEvent, AuditMetadata, AuditSeverity, MetadataValue};
use crate::model::reminder::{ComplianceReminder, ReminderStatus};
use crate::model::report::{BehaviorEmergencyReport, FollowUpAction, ReportStatus};
use crate::model::session::UserRole;

/// The three cross-linked seed collections, generated together.
pub struct SeedData {
    pub reports: Vec<BehaviorEmergencyReport>,
    pub reminders: Vec<ComplianceReminder>,
    pub audit_trail: Vec<AuditEvent>,
}

impl SeedData {
    pub fn generate(now: DateTime<Utc>) -> Self {
        let reports = seed_reports(now);
        let reminders = seed_reminders(now, &reports);
        let audit_trail = seed_audit_trail(now, &reports);
        Self {
            reports,
            reminders,
            audit_trail,
        }
    }
}

fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid seed time")
}

fn seed_reports(now: DateTime<Utc>) -> Vec<BehaviorEmergencyReport> {
    vec![
        BehaviorEmergencyReport {
            id: Uuid::new_v4(),
            student_name: "Alex Martinez".to_string(),
            student_id: "S-48392".to_string(),
            grade_level: "8".to_string(),
            guardian_contacted: true,
            guardian_contacted_on: Some(now - Duration::hours(6)),
            guardian_contact_method: Some("Phone Call".to_string()),
            site: "Sunset Middle School".to_string(),
            district: "Bay Unified".to_string(),
            location: "Classroom 204".to_string(),
            incident_date: (now - Duration::hours(24)).date_naive(),
            incident_time: time_of_day(11, 15),
            precipitating_factors: "Escalated after peer conflict during science lab.".to_string(),
            incident_description:
                "Student became physically aggressive toward peer; staff implemented CPI-approved blocking techniques."
                    .to_string(),
            interventions_attempted:
                "Verbal de-escalation, offer of break space, contact of on-site crisis responder."
                    .to_string(),
            physical_intervention_used: true,
            physical_intervention_type: Some("Standing hold (CPI Level 2)".to_string()),
            restraint_duration_minutes: Some(4),
            injuries_reported: false,
            medical_follow_up_required: false,
            follow_up_due_date: Some(now + Duration::hours(48)),
            follow_up_actions: vec![
                FollowUpAction::new("Schedule parent/guardian debrief"),
                FollowUpAction::new("Update positive behavior intervention plan"),
            ],
            behavior_specialist_assigned: Some("Jordan Chen".to_string()),
            status: ReportStatus::UnderReview,
            debrief_completed: false,
            debrief_notes: None,
            created_at: now - Duration::hours(20),
            updated_at: now - Duration::hours(12),
            created_by: "N. Rivera".to_string(),
            updated_by: "N. Rivera".to_string(),
            reviewed_by: Some("Dr. Lee".to_string()),
        },
        BehaviorEmergencyReport {
            id: Uuid::new_v4(),
            student_name: "Skylar Johnson".to_string(),
            student_id: "S-58302".to_string(),
            grade_level: "10".to_string(),
            guardian_contacted: true,
            guardian_contacted_on: Some(now - Duration::hours(48)),
            guardian_contact_method: Some("Email summary + phone follow-up".to_string()),
            site: "Pacific High School".to_string(),
            district: "Bay Unified".to_string(),
            location: "Cafeteria".to_string(),
            incident_date: (now - Duration::hours(36)).date_naive(),
            incident_time: time_of_day(12, 35),
            precipitating_factors:
                "Overstimulation due to loud environment; denied request for quiet space."
                    .to_string(),
            incident_description:
                "Student attempted to exit campus; two-person CPI team supported and escorted student to sensory room."
                    .to_string(),
            interventions_attempted:
                "Sensory supports, CPI supportive stance, option to call parent, offer of counselor."
                    .to_string(),
            physical_intervention_used: true,
            physical_intervention_type: Some("Team control position (CPI Level 3)".to_string()),
            restraint_duration_minutes: Some(6),
            injuries_reported: false,
            medical_follow_up_required: false,
            follow_up_due_date: Some(now - Duration::hours(4)),
            follow_up_actions: vec![
                FollowUpAction {
                    label: "Hold staff CPI refresher huddle".to_string(),
                    completed: true,
                    completed_on: Some(now - Duration::hours(5)),
                },
                FollowUpAction::new("Complete student debrief form"),
            ],
            behavior_specialist_assigned: Some("Amelia Patel".to_string()),
            status: ReportStatus::FollowUpScheduled,
            debrief_completed: true,
            debrief_notes: Some(
                "Student processed incident and identified sensory strategies.".to_string(),
            ),
            created_at: now - Duration::hours(40),
            updated_at: now - Duration::hours(10),
            created_by: "A. Patel".to_string(),
            updated_by: "A. Patel".to_string(),
            reviewed_by: Some("Principal Gomez".to_string()),
        },
        BehaviorEmergencyReport {
            id: Uuid::new_v4(),
            student_name: "Jordan Diaz".to_string(),
            student_id: "S-29401".to_string(),
            grade_level: "5".to_string(),
            guardian_contacted: true,
            guardian_contacted_on: Some(now - Duration::hours(3)),
            guardian_contact_method: Some("Video conference".to_string()),
            site: "Harbor Elementary".to_string(),
            district: "Bay Unified".to_string(),
            location: "Playground".to_string(),
            incident_date: now.date_naive(),
            incident_time: time_of_day(13, 5),
            precipitating_factors: "Transition from preferred to non-preferred activity."
                .to_string(),
            incident_description:
                "Student attempted to run toward parking lot; CPI team implemented transport position for safety."
                    .to_string(),
            interventions_attempted:
                "Visual schedule reminder, first/then prompt, offered calming toolkit.".to_string(),
            physical_intervention_used: true,
            physical_intervention_type: Some("Transport position (CPI Level 4)".to_string()),
            restraint_duration_minutes: Some(2),
            injuries_reported: false,
            medical_follow_up_required: false,
            follow_up_due_date: Some(now + Duration::hours(72)),
            follow_up_actions: vec![
                FollowUpAction::new("Submit CALPADS BER summary"),
                FollowUpAction::new("Schedule IEP team debrief"),
            ],
            behavior_specialist_assigned: Some("Luis Mendoza".to_string()),
            status: ReportStatus::Submitted,
            debrief_completed: false,
            debrief_notes: None,
            created_at: now,
            updated_at: now,
            created_by: "S. Carter".to_string(),
            updated_by: "S. Carter".to_string(),
            reviewed_by: None,
        },
    ]
}

fn seed_reminders(
    now: DateTime<Utc>,
    reports: &[BehaviorEmergencyReport],
) -> Vec<ComplianceReminder> {
    vec![
        ComplianceReminder {
            id: Uuid::new_v4(),
            title: "Submit BER to District Office".to_string(),
            description: "California Ed Code requires BER submission within 2 school days."
                .to_string(),
            due_date: now + Duration::hours(24),
            status: ReminderStatus::Pending,
            related_report_id: reports.get(2).map(|report| report.id),
            owner_role: UserRole::ProgramSpecialist,
            created_at: now,
        },
        ComplianceReminder {
            id: Uuid::new_v4(),
            title: "Parent/Guardian debrief pending".to_string(),
            description: "Ensure CPI debrief conversation is documented and signed.".to_string(),
            due_date: now - Duration::hours(2),
            status: ReminderStatus::Pending,
            related_report_id: reports.get(1).map(|report| report.id),
            owner_role: UserRole::SchoolSiteLeader,
            created_at: now - Duration::hours(6),
        },
    ]
}

fn seed_audit_trail(now: DateTime<Utc>, reports: &[BehaviorEmergencyReport]) -> Vec<AuditEvent> {
    let mut first_metadata = AuditMetadata::new();
    if let Some(report) = reports.first() {
        first_metadata.insert("reportId".to_string(), MetadataValue::from(report.id));
        first_metadata.insert(
            "status".to_string(),
            MetadataValue::from(report.status.to_string()),
        );
    }

    let mut second_metadata = AuditMetadata::new();
    if let Some(report) = reports.get(1) {
        second_metadata.insert("reportId".to_string(), MetadataValue::from(report.id));
        if let Some(due_date) = report.follow_up_due_date {
            second_metadata.insert(
                "dueDate".to_string(),
                MetadataValue::from(due_date.to_rfc3339()),
            );
        }
    }

    vec![
        AuditEvent {
            id: Uuid::new_v4(),
            timestamp: now - Duration::hours(20),
            actor: "Dr. Lee".to_string(),
            actor_role: UserRole::Administrator,
            action: "Reviewed incident narrative for accuracy".to_string(),
            target: "Report".to_string(),
            metadata: first_metadata,
            severity: AuditSeverity::Info,
        },
        AuditEvent {
            id: Uuid::new_v4(),
            timestamp: now - Duration::hours(10),
            actor: "Principal Gomez".to_string(),
            actor_role: UserRole::SchoolSiteLeader,
            action: "Scheduled follow-up debrief with student support team".to_string(),
            target: "Report".to_string(),
            metadata: second_metadata,
            severity: AuditSeverity::Info,
        },
    ]
}
