// ============================================================================
// AppGate Core - Group-Role Link Entity
// File: crates/appgate-core/src/domain/group_role.rs
// Description: Association record granting a role to a group
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group-role link. Identity is the composite `(group_id, role_id)`;
/// a group holds a given role at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRole {
    pub group_id: i64,
    pub role_id: i64,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

/// Insert shape for a link. Created only through the assign-roles
/// operation, never directly.
#[derive(Debug, Clone)]
pub struct NewGroupRole {
    pub group_id: i64,
    pub role_id: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
}

impl NewGroupRole {
    pub fn new(group_id: i64, role_id: i64, actor: &str) -> Self {
        let now = Utc::now();
        Self {
            group_id,
            role_id,
            created_at: now,
            created_by: actor.to_string(),
            modified_at: now,
            modified_by: actor.to_string(),
        }
    }
}
