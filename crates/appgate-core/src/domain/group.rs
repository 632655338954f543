// ============================================================================
// AppGate Core - Group Entity
// File: crates/appgate-core/src/domain/group.rs
// Description: Administrative bucket applications belong to
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Group entity. Applications reference a group through a nullable
/// foreign key; roles attach through group-role links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

/// Insert shape for a new group; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

impl NewGroup {
    pub fn new(name: &str, actor: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Group name cannot be empty.".to_string()));
        }
        let now = Utc::now();
        Ok(Self {
            name: name.to_string(),
            created_at: now,
            created_by: actor.to_string(),
            modified_at: now,
            modified_by: actor.to_string(),
        })
    }
}
