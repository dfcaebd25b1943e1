//! Case-management entity store and domain operations.
//!
//! # Responsibility
//! - Own the four top-level collections (reports, reminders, audit trail,
//!   session) and mirror each to the durable keyed store.
//! - Provide every mutating operation the presentation layer invokes.
//!
//! # Invariants
//! - Collections are newest-first; creation prepends.
//! - Every mutation persists the touched collection(s) in full before
//!   returning; there is no batching.
//! - Lookup misses are silent no-ops, indistinguishable from success.
//! - Audit events are appended per the per-operation contracts below,
//!   never removed.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::audit::{AuditDraft, AuditEvent, AuditMetadata, AuditSeverity, MetadataValue};
use crate::model::reminder::{
    normalize_reminders, ComplianceReminder, ReminderDraft, ReminderStatus,
};
use crate::model::report::{BehaviorEmergencyReport, ReportDraft, ReportStatus};
use crate::model::session::{UserProfile, UserRole};
use crate::model::EntityId;
use crate::repo::keyed_store::KeyedStore;
use crate::service::seed::SeedData;

/// Shared namespace prefix for all collection keys.
pub const STORAGE_PREFIX: &str = "bertrack";
pub const REPORTS_KEY: &str = "bertrack::reports";
pub const REMINDERS_KEY: &str = "bertrack::reminders";
pub const AUDIT_KEY: &str = "bertrack::audit";
pub const SESSION_KEY: &str = "bertrack::user";

/// Actor name recorded when a report is created without an active session.
pub const SYSTEM_ACTOR: &str = "System";

const TARGET_SESSION: &str = "Session";
const TARGET_REPORT: &str = "Report";
const TARGET_REMINDER: &str = "Reminder";
const TARGET_FOLLOW_UP: &str = "Follow-up";

/// Optional review fields accompanying a status transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    pub reviewer: Option<String>,
    /// Applied to the report's debrief notes only when non-empty.
    pub note: Option<String>,
}

/// The single source of truth for case-management state.
///
/// Holds the collections in memory, mirrors each through the keyed store,
/// and exposes the domain operations plus read-only projections. `&mut`
/// receivers enforce the single-writer model.
pub struct CaseService<S: KeyedStore> {
    store: S,
    reports: Vec<BehaviorEmergencyReport>,
    reminders: Vec<ComplianceReminder>,
    audit_trail: Vec<AuditEvent>,
    current_user: Option<UserProfile>,
}

impl<S: KeyedStore> CaseService<S> {
    /// Loads all collections from the store, seeding each absent one with
    /// the fixed default dataset, and writes every collection back so a
    /// first run is durable immediately.
    pub fn new(store: S) -> Self {
        let SeedData {
            reports,
            reminders,
            audit_trail,
        } = SeedData::generate(Utc::now());

        let reports = store.load(REPORTS_KEY, reports);
        let reminders = store.load(REMINDERS_KEY, reminders);
        let audit_trail = store.load(AUDIT_KEY, audit_trail);
        let current_user = store.load(SESSION_KEY, None);

        store.save(REPORTS_KEY, &reports);
        store.save(REMINDERS_KEY, &reminders);
        store.save(AUDIT_KEY, &audit_trail);
        store.save(SESSION_KEY, &current_user);

        Self {
            store,
            reports,
            reminders,
            audit_trail,
            current_user,
        }
    }

    // ---- session ----

    /// Replaces the current session with `profile` and audits the login.
    ///
    /// Logging in while already logged in silently overwrites. The caller
    /// validates the profile (`UserProfile::validate`) beforehand.
    pub fn login(&mut self, profile: UserProfile) {
        let draft = AuditDraft {
            actor: profile.name.clone(),
            actor_role: profile.role,
            action: "Authenticated to BER portal".to_string(),
            target: TARGET_SESSION.to_string(),
            metadata: AuditMetadata::new(),
            severity: AuditSeverity::Info,
        };

        self.current_user = Some(profile);
        self.store.save(SESSION_KEY, &self.current_user);
        self.record_audit(draft);
    }

    /// Ends the current session, auditing with the outgoing profile.
    /// Full no-op when no session exists.
    pub fn logout(&mut self) {
        let Some(user) = self.current_user.clone() else {
            return;
        };

        self.record_audit(AuditDraft {
            actor: user.name,
            actor_role: user.role,
            action: "Ended BER portal session".to_string(),
            target: TARGET_SESSION.to_string(),
            metadata: AuditMetadata::new(),
            severity: AuditSeverity::Info,
        });

        self.current_user = None;
        self.store.save(SESSION_KEY, &self.current_user);
    }

    // ---- audit ----

    /// Appends an immutable audit event: assigns a fresh id and the
    /// current timestamp, prepends, persists.
    pub fn record_audit(&mut self, draft: AuditDraft) {
        let event = AuditEvent {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor: draft.actor,
            actor_role: draft.actor_role,
            action: draft.action,
            target: draft.target,
            metadata: draft.metadata,
            severity: draft.severity,
        };
        self.audit_trail.insert(0, event);
        self.store.save(AUDIT_KEY, &self.audit_trail);
    }

    // ---- reports ----

    /// Materializes and stores a new report from `draft`.
    ///
    /// # Contract
    /// - `created_at == updated_at`; provenance is the session actor or
    ///   the `System` sentinel.
    /// - Status falls back to `Submitted` when the draft carries none.
    /// - Audited unconditionally, with the fallback identity when no
    ///   session is active.
    /// - A draft with a follow-up due date additionally synthesizes one
    ///   pending reminder linked to the new report; the reminder itself
    ///   is not audited.
    pub fn create_report(&mut self, draft: ReportDraft) -> BehaviorEmergencyReport {
        let now = Utc::now();
        let (actor, actor_role) = match &self.current_user {
            Some(user) => (user.name.clone(), user.role),
            None => (SYSTEM_ACTOR.to_string(), UserRole::Administrator),
        };

        let student_name = draft.student_name.clone();
        let follow_up_due_date = draft.follow_up_due_date;

        let report = draft.materialize(Uuid::new_v4(), now, &actor);
        self.reports.insert(0, report.clone());
        self.store.save(REPORTS_KEY, &self.reports);

        let mut metadata = AuditMetadata::new();
        metadata.insert("reportId".to_string(), MetadataValue::from(report.id));
        metadata.insert(
            "status".to_string(),
            MetadataValue::from(report.status.to_string()),
        );
        self.record_audit(AuditDraft {
            actor,
            actor_role,
            action: format!("Created BER for {student_name}"),
            target: TARGET_REPORT.to_string(),
            metadata,
            severity: AuditSeverity::Info,
        });

        if let Some(due_date) = follow_up_due_date {
            let reminder = ComplianceReminder {
                id: Uuid::new_v4(),
                title: format!("Follow-up due for {student_name}"),
                description:
                    "Document follow-up actions and close the report within the mandated window."
                        .to_string(),
                due_date,
                status: ReminderStatus::Pending,
                related_report_id: Some(report.id),
                owner_role: UserRole::ProgramSpecialist,
                created_at: now,
            };
            self.reminders.insert(0, reminder);
            self.store.save(REMINDERS_KEY, &self.reminders);
        }

        report
    }

    /// Transitions a report's lifecycle status.
    ///
    /// Unknown ids leave the collection unchanged. Audited only with an
    /// active session — even when the id missed; severity is info for
    /// `Closed` and warning for every open state.
    pub fn update_report_status(
        &mut self,
        report_id: EntityId,
        status: ReportStatus,
        options: StatusUpdate,
    ) {
        let now = Utc::now();
        let actor = self.current_user.as_ref().map(|user| user.name.clone());

        if let Some(report) = self.reports.iter_mut().find(|report| report.id == report_id) {
            report.status = status;
            report.updated_at = now;
            if let Some(name) = &actor {
                report.updated_by = name.clone();
            }
            if let Some(reviewer) = options.reviewer {
                report.reviewed_by = Some(reviewer);
            }
            if let Some(note) = options.note {
                if !note.is_empty() {
                    report.debrief_notes = Some(note);
                }
            }
        }
        self.store.save(REPORTS_KEY, &self.reports);

        if let Some(user) = self.current_user.clone() {
            let severity = if status == ReportStatus::Closed {
                AuditSeverity::Info
            } else {
                AuditSeverity::Warning
            };
            let mut metadata = AuditMetadata::new();
            metadata.insert("reportId".to_string(), MetadataValue::from(report_id));
            metadata.insert(
                "status".to_string(),
                MetadataValue::from(status.to_string()),
            );
            self.record_audit(AuditDraft {
                actor: user.name,
                actor_role: user.role,
                action: format!("Updated report status to {status}"),
                target: TARGET_REPORT.to_string(),
                metadata,
                severity,
            });
        }
    }

    /// Toggles one follow-up checklist item, addressed by index.
    ///
    /// Completing sets `completed_on` to the supplied instant or now;
    /// reopening clears it. An out-of-range index leaves the checklist
    /// untouched, but the parent's provenance still refreshes when the
    /// report matched. Audited only with an active session.
    pub fn update_follow_up_action(
        &mut self,
        report_id: EntityId,
        action_index: usize,
        completed: bool,
        completed_on: Option<DateTime<Utc>>,
    ) {
        let now = Utc::now();
        let actor = self.current_user.as_ref().map(|user| user.name.clone());

        if let Some(report) = self.reports.iter_mut().find(|report| report.id == report_id) {
            if let Some(action) = report.follow_up_actions.get_mut(action_index) {
                action.completed = completed;
                action.completed_on = if completed {
                    Some(completed_on.unwrap_or(now))
                } else {
                    None
                };
            }
            report.updated_at = now;
            if let Some(name) = &actor {
                report.updated_by = name.clone();
            }
        }
        self.store.save(REPORTS_KEY, &self.reports);

        if let Some(user) = self.current_user.clone() {
            let (action, severity) = if completed {
                ("Completed follow-up task", AuditSeverity::Info)
            } else {
                ("Reopened follow-up task", AuditSeverity::Warning)
            };
            let mut metadata = AuditMetadata::new();
            metadata.insert("reportId".to_string(), MetadataValue::from(report_id));
            metadata.insert("index".to_string(), MetadataValue::from(action_index));
            self.record_audit(AuditDraft {
                actor: user.name,
                actor_role: user.role,
                action: action.to_string(),
                target: TARGET_FOLLOW_UP.to_string(),
                metadata,
                severity,
            });
        }
    }

    // ---- reminders ----

    /// Stores a new pending reminder from `draft` and returns it.
    /// Audited only with an active session.
    pub fn add_reminder(&mut self, draft: ReminderDraft) -> ComplianceReminder {
        let reminder = ComplianceReminder {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            status: ReminderStatus::Pending,
            related_report_id: draft.related_report_id,
            owner_role: draft.owner_role,
            created_at: Utc::now(),
        };
        self.reminders.insert(0, reminder.clone());
        self.store.save(REMINDERS_KEY, &self.reminders);

        if let Some(user) = self.current_user.clone() {
            let mut metadata = AuditMetadata::new();
            metadata.insert(
                "dueDate".to_string(),
                MetadataValue::from(reminder.due_date.to_rfc3339()),
            );
            self.record_audit(AuditDraft {
                actor: user.name,
                actor_role: user.role,
                action: format!("Created compliance reminder: {}", reminder.title),
                target: TARGET_REMINDER.to_string(),
                metadata,
                severity: AuditSeverity::Info,
            });
        }

        reminder
    }

    /// Marks a reminder complete. Completion is terminal: normalization
    /// never recomputes a complete reminder. Unknown ids leave the
    /// collection unchanged. Audited only with an active session — even
    /// when the id missed.
    pub fn complete_reminder(&mut self, reminder_id: EntityId) {
        if let Some(reminder) = self
            .reminders
            .iter_mut()
            .find(|reminder| reminder.id == reminder_id)
        {
            reminder.status = ReminderStatus::Complete;
        }
        self.store.save(REMINDERS_KEY, &self.reminders);

        if let Some(user) = self.current_user.clone() {
            let mut metadata = AuditMetadata::new();
            metadata.insert("reminderId".to_string(), MetadataValue::from(reminder_id));
            self.record_audit(AuditDraft {
                actor: user.name,
                actor_role: user.role,
                action: "Closed a compliance reminder".to_string(),
                target: TARGET_REMINDER.to_string(),
                metadata,
                severity: AuditSeverity::Info,
            });
        }
    }

    // ---- read-only projections ----

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    /// Reports in creation order, newest first.
    pub fn reports(&self) -> &[BehaviorEmergencyReport] {
        &self.reports
    }

    /// Audit events, newest first.
    pub fn audit_trail(&self) -> &[AuditEvent] {
        &self.audit_trail
    }

    /// Reminders with status normalized at the current instant.
    pub fn reminders(&self) -> Vec<ComplianceReminder> {
        self.reminders_at(Utc::now())
    }

    /// Reminders with status normalized at a caller-supplied instant.
    pub fn reminders_at(&self, now: DateTime<Utc>) -> Vec<ComplianceReminder> {
        normalize_reminders(&self.reminders, now)
    }
}
