// ============================================================================
// AppGate Core - Role Entity
// File: crates/appgate-core/src/domain/role.rs
// Description: Named permission unit attached to groups
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

/// Insert shape for a new role; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

impl NewRole {
    pub fn new(name: &str, actor: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Role name cannot be empty.".to_string()));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_role_rejects_blank_name() {
        assert!(NewRole::new(" ", "admin").is_err());
        assert!(NewRole::new("Reader", "admin").is_ok());
    }
}
