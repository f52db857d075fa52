use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::job::errors::JobError;
use crate::job::types::PortabilityJob;

/// Keyed persistence of portability jobs with optimistic concurrency.
///
/// `update` is a compare-and-swap on `PortabilityJob::version`: it succeeds only
/// when the stored version equals the version the caller read, and returns the
/// record as stored with the version bumped.
#[async_trait]
pub trait JobStore: Send + Sync + 'static {
    /// Prepare backing tables. Safe to call more than once.
    async fn init(&self) -> Result<(), JobError>;

    /// Store a new job. Fails with `Conflict` if the id is taken.
    async fn insert(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError>;

    async fn find(&self, id: &str) -> Result<PortabilityJob, JobError>;

    async fn update(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError>;
}

/// Flat row shape shared by the SQL backends.
#[derive(Debug, Clone, FromRow)]
pub(super) struct JobRow {
    pub(super) id: String,
    pub(super) data_type: String,
    pub(super) export_service: Option<String>,
    pub(super) import_service: Option<String>,
    pub(super) export_auth_data: Option<String>,
    pub(super) import_auth_data: Option<String>,
    pub(super) auth_state: String,
    pub(super) version: i64,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for PortabilityJob {
    type Error = JobError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            data_type: row.data_type.parse()?,
            export_service: row.export_service,
            import_service: row.import_service,
            export_auth_data: row
                .export_auth_data
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            import_auth_data: row
                .import_auth_data
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            auth_state: row.auth_state.parse()?,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<&PortabilityJob> for JobRow {
    type Error = JobError;

    fn try_from(job: &PortabilityJob) -> Result<Self, Self::Error> {
        Ok(Self {
            id: job.id.clone(),
            data_type: job.data_type.as_str().to_string(),
            export_service: job.export_service.clone(),
            import_service: job.import_service.clone(),
            export_auth_data: job
                .export_auth_data
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            import_auth_data: job
                .import_auth_data
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            auth_state: job.auth_state.as_str().to_string(),
            version: job.version,
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
    }
}
