//! Core domain logic for BER case management.
//! This crate is the single source of truth for reports, compliance
//! reminders, the audit trail, and the asserted session identity.

pub mod db;
pub mod insights;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::audit::{AuditDraft, AuditEvent, AuditMetadata, AuditSeverity, MetadataValue};
pub use model::reminder::{
    normalize_reminders, ComplianceReminder, ReminderDraft, ReminderStatus,
};
pub use model::report::{BehaviorEmergencyReport, FollowUpAction, ReportDraft, ReportStatus};
pub use model::session::{UserProfile, UserRole};
pub use model::{DraftValidationError, EntityId};
pub use repo::keyed_store::{KeyedStore, SqliteKeyedStore, StoreError, StoreResult};
pub use service::case_service::{CaseService, StatusUpdate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
