// ============================================================================
// AppGate Core - Application Entity
// File: crates/appgate-core/src/domain/application.rs
// Description: Registered API-consumer application
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::domain::{Group, Role};

/// Lifecycle status of a registered application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppStatus {
    Pending,
    Approved,
    Rejected,
}

impl AppStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatus::Pending => "Pending",
            AppStatus::Approved => "Approved",
            AppStatus::Rejected => "Rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(AppStatus::Pending),
            "Approved" => Some(AppStatus::Approved),
            "Rejected" => Some(AppStatus::Rejected),
            _ => None,
        }
    }
}

/// Application entity. The `app_id`/`app_key` pair is the credential other
/// services present on `/api/access`; it is unique as a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub app_id: String,
    pub app_key: String,
    pub name: String,
    pub status: AppStatus,
    /// An application may exist ungrouped.
    pub group_id: Option<i64>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

impl Application {
    pub fn approve(&mut self, actor: &str) {
        self.status = AppStatus::Approved;
        self.touch(actor);
    }

    pub fn reject(&mut self, actor: &str) {
        self.status = AppStatus::Rejected;
        self.touch(actor);
    }

    /// Overwrites any prior assignment; no history is kept.
    pub fn assign_group(&mut self, group_id: i64, actor: &str) {
        self.group_id = Some(group_id);
        self.touch(actor);
    }

    fn touch(&mut self, actor: &str) {
        self.modified_at = Utc::now();
        self.modified_by = actor.to_string();
    }
}

/// Insert shape for a new application; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub app_id: String,
    pub app_key: String,
    pub name: String,
    pub status: AppStatus,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

impl NewApplication {
    /// A credential field that is absent, blank, or the literal "null"
    /// (any casing) is replaced by a generated token; anything else is
    /// stored verbatim.
    pub fn new(
        name: &str,
        app_id: Option<&str>,
        app_key: Option<&str>,
        actor: &str,
    ) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "Application name cannot be empty.".to_string(),
            ));
        }

        let app_id = normalize_credential(app_id, appgate_security::credentials::generate_app_id);
        let app_key = normalize_credential(app_key, appgate_security::credentials::generate_app_key);

        let now = Utc::now();
        Ok(Self {
            app_id,
            app_key,
            name: name.to_string(),
            status: AppStatus::Pending,
            group_id: None,
            created_at: now,
            created_by: actor.to_string(),
            modified_at: now,
            modified_by: actor.to_string(),
        })
    }
}

fn normalize_credential(supplied: Option<&str>, generate: fn() -> String) -> String {
    match supplied {
        Some(v) if !v.trim().is_empty() && !v.eq_ignore_ascii_case("null") => v.to_string(),
        _ => generate(),
    }
}

/// An application eagerly joined with its group and the group's roles,
/// as returned by the credential lookup.
#[derive(Debug, Clone)]
pub struct ResolvedApplication {
    pub application: Application,
    pub group: Option<Group>,
    pub roles: Vec<Role>,
}
