use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::job::errors::JobError;
use crate::job::types::PortabilityJob;

use super::config::DB_TABLE_JOBS;
use super::store_type::{JobRow, JobStore};

#[derive(Clone, Debug)]
pub struct PostgresJobStore {
    pool: Pool<Postgres>,
}

impl PostgresJobStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), JobError> {
    let jobs_table = DB_TABLE_JOBS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {jobs_table} (
            id TEXT PRIMARY KEY NOT NULL,
            data_type TEXT NOT NULL,
            export_service TEXT,
            import_service TEXT,
            export_auth_data TEXT,
            import_auth_data TEXT,
            auth_state TEXT NOT NULL,
            version BIGINT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| JobError::Storage(e.to_string()))?;

    Ok(())
}

#[async_trait]
impl JobStore for PostgresJobStore {
    async fn init(&self) -> Result<(), JobError> {
        create_tables_postgres(&self.pool).await
    }

    async fn insert(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError> {
        let table_name = DB_TABLE_JOBS.as_str();
        let row = JobRow::try_from(&job)?;

        sqlx::query(&format!(
            r#"
            INSERT INTO {table_name}
            (id, data_type, export_service, import_service, export_auth_data,
             import_auth_data, auth_state, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#
        ))
        .bind(&row.id)
        .bind(&row.data_type)
        .bind(&row.export_service)
        .bind(&row.import_service)
        .bind(&row.export_auth_data)
        .bind(&row.import_auth_data)
        .bind(&row.auth_state)
        .bind(row.version)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                JobError::Conflict(format!("job {} already exists", job.id))
            }
            e => JobError::Storage(e.to_string()),
        })?;

        Ok(job)
    }

    async fn find(&self, id: &str) -> Result<PortabilityJob, JobError> {
        let table_name = DB_TABLE_JOBS.as_str();

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT * FROM {table_name} WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| JobError::NotFound(id.to_string()))?;

        row.try_into()
    }

    async fn update(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError> {
        let table_name = DB_TABLE_JOBS.as_str();
        let mut updated = job;
        updated.updated_at = Utc::now();
        let row = JobRow::try_from(&updated)?;

        let result = sqlx::query(&format!(
            r#"
            UPDATE {table_name}
            SET data_type = $1, export_service = $2, import_service = $3,
                export_auth_data = $4, import_auth_data = $5, auth_state = $6,
                version = version + 1, updated_at = $7
            WHERE id = $8 AND version = $9
            "#
        ))
        .bind(&row.data_type)
        .bind(&row.export_service)
        .bind(&row.import_service)
        .bind(&row.export_auth_data)
        .bind(&row.import_auth_data)
        .bind(&row.auth_state)
        .bind(row.updated_at)
        .bind(&row.id)
        .bind(row.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let exists: Option<(String,)> =
                sqlx::query_as(&format!("SELECT id FROM {table_name} WHERE id = $1"))
                    .bind(&row.id)
                    .fetch_optional(&self.pool)
                    .await?;
            return Err(match exists {
                Some(_) => {
                    tracing::warn!("Stale update for job {}", row.id);
                    JobError::Conflict(row.id)
                }
                None => JobError::NotFound(row.id),
            });
        }

        updated.version += 1;
        Ok(updated)
    }
}
