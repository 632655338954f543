// ============================================================================
// AppGate Infrastructure - PostgreSQL Group-Role Repository
// File: crates/appgate-infrastructure/src/database/postgres/group_role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use appgate_core::domain::{GroupRole, NewGroupRole};
use appgate_core::error::DomainError;
use appgate_core::repositories::GroupRoleRepository;

use super::db_error;

pub struct PgGroupRoleRepository {
    pool: PgPool,
}

impl PgGroupRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRoleRepository for PgGroupRoleRepository {
    async fn find_by_group(&self, group_id: i64) -> Result<Vec<GroupRole>, DomainError> {
        let rows: Vec<GroupRoleRow> = sqlx::query_as(
            r#"
            SELECT group_id, role_id, created_at, created_by, modified_at, modified_by
            FROM group_roles
            WHERE group_id = $1
            ORDER BY role_id
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding links by group"))?;

        Ok(rows.into_iter().map(GroupRole::from).collect())
    }

    async fn find_by_role(&self, role_id: i64) -> Result<Vec<GroupRole>, DomainError> {
        let rows: Vec<GroupRoleRow> = sqlx::query_as(
            r#"
            SELECT group_id, role_id, created_at, created_by, modified_at, modified_by
            FROM group_roles
            WHERE role_id = $1
            ORDER BY group_id
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding links by role"))?;

        Ok(rows.into_iter().map(GroupRole::from).collect())
    }

    async fn add_links(&self, links: &[NewGroupRole]) -> Result<u64, DomainError> {
        // One transaction for the whole batch: a role or group deleted
        // between validation and insert fails every link via the FK, and
        // pairs the group already holds are skipped by the composite key.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting link batch"))?;

        let mut created = 0;
        for link in links {
            let result = sqlx::query(
                r#"
                INSERT INTO group_roles (
                    group_id, role_id, created_at, created_by, modified_at, modified_by
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (group_id, role_id) DO NOTHING
                "#,
            )
            .bind(link.group_id)
            .bind(link.role_id)
            .bind(link.created_at)
            .bind(&link.created_by)
            .bind(link.modified_at)
            .bind(&link.modified_by)
            .execute(&mut *tx)
            .await
            .map_err(db_error("inserting group-role link"))?;

            created += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(db_error("committing link batch"))?;

        info!(requested = links.len(), created, "group-role links inserted");
        Ok(created)
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct GroupRoleRow {
    group_id: i64,
    role_id: i64,
    created_at: DateTime<Utc>,
    created_by: String,
    modified_at: DateTime<Utc>,
    modified_by: String,
}

impl From<GroupRoleRow> for GroupRole {
    fn from(row: GroupRoleRow) -> Self {
        GroupRole {
            group_id: row.group_id,
            role_id: row.role_id,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}
