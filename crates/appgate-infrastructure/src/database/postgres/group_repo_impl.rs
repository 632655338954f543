// ============================================================================
// AppGate Infrastructure - PostgreSQL Group Repository
// File: crates/appgate-infrastructure/src/database/postgres/group_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use appgate_core::domain::{Group, NewGroup};
use appgate_core::error::DomainError;
use appgate_core::repositories::{GroupDeleteOutcome, GroupRepository};

use super::db_error;

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn get_all(&self) -> Result<Vec<Group>, DomainError> {
        let rows: Vec<GroupRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, created_by, modified_at, modified_by
            FROM application_groups
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing groups"))?;

        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, created_by, modified_at, modified_by
            FROM application_groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding group by id"))?;

        Ok(row.map(Group::from))
    }

    async fn add(&self, group: &NewGroup) -> Result<Group, DomainError> {
        let row: GroupRow = sqlx::query_as(
            r#"
            INSERT INTO application_groups (name, created_at, created_by, modified_at, modified_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, created_at, created_by, modified_at, modified_by
            "#,
        )
        .bind(&group.name)
        .bind(group.created_at)
        .bind(&group.created_by)
        .bind(group.modified_at)
        .bind(&group.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating group"))?;

        info!(group_id = row.id, "group row inserted");
        Ok(row.into())
    }

    async fn update(&self, group: &Group) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE application_groups
            SET name = $2, created_at = $3, created_by = $4, modified_at = $5, modified_by = $6
            WHERE id = $1
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(group.created_at)
        .bind(&group.created_by)
        .bind(group.modified_at)
        .bind(&group.modified_by)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating group"))?;

        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM application_groups WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("checking group existence"))?;

        Ok(found)
    }

    async fn delete_if_unreferenced(&self, id: i64) -> Result<GroupDeleteOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting group delete"))?;

        // The row lock serializes this check-then-delete against
        // concurrent assignments referencing the group.
        let locked: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM application_groups WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("locking group for delete"))?;

        if locked.is_none() {
            return Ok(GroupDeleteOutcome::NotFound);
        }

        let (has_applications,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM applications WHERE group_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("checking dependent applications"))?;

        if has_applications {
            return Ok(GroupDeleteOutcome::HasApplications);
        }

        let (has_roles,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM group_roles WHERE group_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("checking dependent role links"))?;

        if has_roles {
            return Ok(GroupDeleteOutcome::HasRoles);
        }

        sqlx::query("DELETE FROM application_groups WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting group"))?;

        tx.commit()
            .await
            .map_err(db_error("committing group delete"))?;

        Ok(GroupDeleteOutcome::Deleted)
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    created_by: String,
    modified_at: DateTime<Utc>,
    modified_by: String,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}
