// ============================================================================
// AppGate Infrastructure - PostgreSQL Role Repository
// File: crates/appgate-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use appgate_core::domain::{NewRole, Role};
use appgate_core::error::DomainError;
use appgate_core::repositories::{RoleDeleteOutcome, RoleRepository};

use super::db_error;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn get_all(&self) -> Result<Vec<Role>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, created_by, modified_at, modified_by
            FROM roles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing roles"))?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, created_by, modified_at, modified_by
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding role by id"))?;

        Ok(row.map(Role::from))
    }

    async fn add(&self, role: &NewRole) -> Result<Role, DomainError> {
        let row: RoleRow = sqlx::query_as(
            r#"
            INSERT INTO roles (name, created_at, created_by, modified_at, modified_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, created_at, created_by, modified_at, modified_by
            "#,
        )
        .bind(&role.name)
        .bind(role.created_at)
        .bind(&role.created_by)
        .bind(role.modified_at)
        .bind(&role.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating role"))?;

        info!(role_id = row.id, "role row inserted");
        Ok(row.into())
    }

    async fn update(&self, role: &Role) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, created_at = $3, created_by = $4, modified_at = $5, modified_by = $6
            WHERE id = $1
            "#,
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(role.created_at)
        .bind(&role.created_by)
        .bind(role.modified_at)
        .bind(&role.modified_by)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating role"))?;

        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let (found,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM roles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("checking role existence"))?;

        Ok(found)
    }

    async fn delete_if_unreferenced(&self, id: i64) -> Result<RoleDeleteOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("starting role delete"))?;

        let locked: Option<(i64,)> = sqlx::query_as("SELECT id FROM roles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("locking role for delete"))?;

        if locked.is_none() {
            return Ok(RoleDeleteOutcome::NotFound);
        }

        let (in_use,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM group_roles WHERE role_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error("checking dependent role links"))?;

        if in_use {
            return Ok(RoleDeleteOutcome::InUse);
        }

        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("deleting role"))?;

        tx.commit()
            .await
            .map_err(db_error("committing role delete"))?;

        Ok(RoleDeleteOutcome::Deleted)
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    created_by: String,
    modified_at: DateTime<Utc>,
    modified_by: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        }
    }
}
