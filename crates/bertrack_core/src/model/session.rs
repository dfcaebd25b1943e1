//! Session identity model.
//!
//! # Responsibility
//! - Define the user roles recognized by the system.
//! - Define the self-asserted session profile recorded at login.
//!
//! # Invariants
//! - At most one profile is active at a time (owned by the case service).
//! - Identity is self-asserted; no credential is verified anywhere.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::model::{require_non_empty, DraftValidationError, EntityId};

/// Staff role attached to a session and to every audit event.
///
/// Serialized as the title-cased display strings so stored datasets stay
/// portable across the original front-end and this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Administrator,
    #[serde(rename = "Program Specialist")]
    ProgramSpecialist,
    #[serde(rename = "School Site Leader")]
    SchoolSiteLeader,
    #[serde(rename = "Behavior Analyst")]
    BehaviorAnalyst,
    #[serde(rename = "Crisis Responder")]
    CrisisResponder,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::ProgramSpecialist => "Program Specialist",
            Self::SchoolSiteLeader => "School Site Leader",
            Self::BehaviorAnalyst => "Behavior Analyst",
            Self::CrisisResponder => "Crisis Responder",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-asserted identity driving all mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl UserProfile {
    /// Edge-side login validation: name and email must be non-empty.
    ///
    /// `login` itself does not re-validate.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        require_non_empty(&[("name", &self.name), ("email", &self.email)])
    }
}

#[cfg(test)]
mod tests {
    use super::{UserProfile, UserRole};
    use crate::model::DraftValidationError;
    use uuid::Uuid;

    fn profile(name: &str, email: &str) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role: UserRole::SchoolSiteLeader,
            site: None,
        }
    }

    #[test]
    fn role_serializes_as_display_string() {
        let json = serde_json::to_string(&UserRole::ProgramSpecialist).unwrap();
        assert_eq!(json, "\"Program Specialist\"");
    }

    #[test]
    fn validate_rejects_blank_name_and_email() {
        let err = profile(" ", "").validate().unwrap_err();
        assert_eq!(
            err,
            DraftValidationError::MissingFields(vec!["name", "email"])
        );

        assert!(profile("N. Rivera", "rivera@bayunified.org")
            .validate()
            .is_ok());
    }
}
