// ============================================================================
// AppGate Infrastructure - PostgreSQL Application Repository
// File: crates/appgate-infrastructure/src/database/postgres/application_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use appgate_core::domain::{
    AppStatus, Application, Group, NewApplication, ResolvedApplication, Role,
};
use appgate_core::error::DomainError;
use appgate_core::repositories::ApplicationRepository;

use super::db_error;

pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn get_all(&self) -> Result<Vec<Application>, DomainError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT id, app_id, app_key, name, status, group_id,
                   created_at, created_by, modified_at, modified_by
            FROM applications
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing applications"))?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Application>, DomainError> {
        let row: Option<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT id, app_id, app_key, name, status, group_id,
                   created_at, created_by, modified_at, modified_by
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding application by id"))?;

        row.map(Application::try_from).transpose()
    }

    async fn find_by_status(&self, status: AppStatus) -> Result<Vec<Application>, DomainError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT id, app_id, app_key, name, status, group_id,
                   created_at, created_by, modified_at, modified_by
            FROM applications
            WHERE status = $1
            ORDER BY id
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding applications by status"))?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn find_by_group(&self, group_id: i64) -> Result<Vec<Application>, DomainError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT id, app_id, app_key, name, status, group_id,
                   created_at, created_by, modified_at, modified_by
            FROM applications
            WHERE group_id = $1
            ORDER BY id
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("finding applications by group"))?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn add(&self, application: &NewApplication) -> Result<Application, DomainError> {
        let row: ApplicationRow = sqlx::query_as(
            r#"
            INSERT INTO applications (
                app_id, app_key, name, status, group_id,
                created_at, created_by, modified_at, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, app_id, app_key, name, status, group_id,
                      created_at, created_by, modified_at, modified_by
            "#,
        )
        .bind(&application.app_id)
        .bind(&application.app_key)
        .bind(&application.name)
        .bind(application.status.as_str())
        .bind(application.group_id)
        .bind(application.created_at)
        .bind(&application.created_by)
        .bind(application.modified_at)
        .bind(&application.modified_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating application: {}", e);
            let msg = e.to_string();
            if msg.contains("unique") || msg.contains("duplicate") {
                DomainError::DuplicateCredentials
            } else {
                DomainError::Database(msg)
            }
        })?;

        info!(application_id = row.id, "application row inserted");
        row.try_into()
    }

    async fn update(&self, application: &Application) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE applications
            SET app_id = $2, app_key = $3, name = $4, status = $5, group_id = $6,
                created_at = $7, created_by = $8, modified_at = $9, modified_by = $10
            WHERE id = $1
            "#,
        )
        .bind(application.id)
        .bind(&application.app_id)
        .bind(&application.app_key)
        .bind(&application.name)
        .bind(application.status.as_str())
        .bind(application.group_id)
        .bind(application.created_at)
        .bind(&application.created_by)
        .bind(application.modified_at)
        .bind(&application.modified_by)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating application"))?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting application"))?;

        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM applications WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("checking application existence"))?;

        Ok(found)
    }

    async fn get_by_credentials(
        &self,
        app_id: &str,
        app_key: &str,
    ) -> Result<Option<ResolvedApplication>, DomainError> {
        let row: Option<ApplicationWithGroupRow> = sqlx::query_as(
            r#"
            SELECT a.id, a.app_id, a.app_key, a.name, a.status, a.group_id,
                   a.created_at, a.created_by, a.modified_at, a.modified_by,
                   g.name        AS group_name,
                   g.created_at  AS group_created_at,
                   g.created_by  AS group_created_by,
                   g.modified_at AS group_modified_at,
                   g.modified_by AS group_modified_by
            FROM applications a
            LEFT JOIN application_groups g ON g.id = a.group_id
            WHERE a.app_id = $1 AND a.app_key = $2
            "#,
        )
        .bind(app_id)
        .bind(app_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding application by credentials"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let group = row.group()?;
        let application = Application::try_from(row)?;

        let roles = match &group {
            Some(group) => {
                let rows: Vec<RoleRow> = sqlx::query_as(
                    r#"
                    SELECT r.id, r.name, r.created_at, r.created_by, r.modified_at, r.modified_by
                    FROM roles r
                    INNER JOIN group_roles gr ON gr.role_id = r.id
                    WHERE gr.group_id = $1
                    ORDER BY r.id
                    "#,
                )
                .bind(group.id)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("loading group roles"))?;

                rows.into_iter().map(Role::from).collect()
            }
            None => vec![],
        };

        Ok(Some(ResolvedApplication {
            application,
            group,
            roles,
        }))
    }
}

// Internal row types for SQLx mapping

#[derive(Debug, FromRow)]
struct ApplicationRow {
    id: i64,
    app_id: String,
    app_key: String,
    name: String,
    status: String,
    group_id: Option<i64>,
    created_at: DateTime<Utc>,
    created_by: String,
    modified_at: DateTime<Utc>,
    modified_by: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = DomainError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = AppStatus::from_str(&row.status).ok_or_else(|| {
            DomainError::Database(format!("unknown application status: {}", row.status))
        })?;
        Ok(Application {
            id: row.id,
            app_id: row.app_id,
            app_key: row.app_key,
            name: row.name,
            status,
            group_id: row.group_id,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        })
    }
}

#[derive(Debug, FromRow)]
struct ApplicationWithGroupRow {
    id: i64,
    app_id: String,
    app_key: String,
    name: String,
    status: String,
    group_id: Option<i64>,
    created_at: DateTime<Utc>,
    created_by: String,
    modified_at: DateTime<Utc>,
    modified_by: String,
    group_name: Option<String>,
    group_created_at: Option<DateTime<Utc>>,
    group_created_by: Option<String>,
    group_modified_at: Option<DateTime<Utc>>,
    group_modified_by: Option<String>,
}

impl ApplicationWithGroupRow {
    /// The FK guarantees the joined columns are present whenever
    /// `group_id` is set.
    fn group(&self) -> Result<Option<Group>, DomainError> {
        let Some(group_id) = self.group_id else {
            return Ok(None);
        };
        match (
            self.group_name.clone(),
            self.group_created_at,
            self.group_created_by.clone(),
            self.group_modified_at,
            self.group_modified_by.clone(),
        ) {
            (Some(name), Some(created_at), Some(created_by), Some(modified_at), Some(modified_by)) => {
                Ok(Some(Group {
                    id: group_id,
                    name,
                    created_at,
                    created_by,
                    modified_at,
                    modified_by,
                }))
            }
            _ => Err(DomainError::Database(format!(
                "application group {} missing from join",
                group_id
            ))),
        }
    }
}

impl TryFrom<ApplicationWithGroupRow> for Application {
    type Error = DomainError;

    fn try_from(row: ApplicationWithGroupRow) -> Result<Self, Self::Error> {
        let status = AppStatus::from_str(&row.status).ok_or_else(|| {
            DomainError::Database(format!("unknown application status: {}", row.status))
        })?;
        Ok(Application {
            id: row.id,
            app_id: row.app_id,
            app_key: row.app_key,
            name: row.name,
            status,
            group_id: row.group_id,
            created_at: row.created_at,
            created_by: row.created_by,
            modified_at: row.modified_at,
            modified_by: row.modified_by,
        })
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, group_id: Option<i64>) -> ApplicationRow {
        let now = Utc::now();
        ApplicationRow {
            id: 1,
            app_id: "acme-id".to_string(),
            app_key: "acme-key".to_string(),
            name: "Acme".to_string(),
            status: status.to_string(),
            group_id,
            created_at: now,
            created_by: "admin".to_string(),
            modified_at: now,
            modified_by: "admin".to_string(),
        }
    }

    #[test]
    fn test_row_maps_known_status() {
        let app = Application::try_from(row("Approved", Some(3))).unwrap();
        assert_eq!(app.status, AppStatus::Approved);
        assert_eq!(app.group_id, Some(3));
    }

    #[test]
    fn test_row_rejects_unknown_status() {
        assert!(Application::try_from(row("Suspended", None)).is_err());
    }
}
