//! Audit trail model.
//!
//! # Responsibility
//! - Define the immutable audit event record and its input draft.
//! - Keep metadata a flat mapping of string keys to primitive values.
//!
//! # Invariants
//! - Events are never mutated or removed after creation.
//! - The owning collection is maintained newest-first.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::session::UserRole;
use crate::model::EntityId;

/// Severity attached to every audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSeverity {
    Info,
    Warning,
    Critical,
}

/// Primitive metadata value: text, whole number, or flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Number(value as i64)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for MetadataValue {
    fn from(value: Uuid) -> Self {
        Self::Text(value.to_string())
    }
}

/// Flat key/value context attached to an audit event.
pub type AuditMetadata = BTreeMap<String, MetadataValue>;

/// Immutable record of an action taken by an identified actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub id: EntityId,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub actor_role: UserRole,
    pub action: String,
    /// Free-text category: "Report", "Reminder", "Session", "Follow-up".
    pub target: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: AuditMetadata,
    pub severity: AuditSeverity,
}

/// Input model for the audit recorder: everything but id and timestamp,
/// which the recorder assigns at append time.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditDraft {
    pub actor: String,
    pub actor_role: UserRole,
    pub action: String,
    pub target: String,
    pub metadata: AuditMetadata,
    pub severity: AuditSeverity,
}
