use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::job::errors::JobError;
use crate::job::types::PortabilityJob;

use super::store_type::JobStore;

/// Reference job store backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryJobStore {
    entry: Mutex<HashMap<String, PortabilityJob>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory job store");
        Self {
            entry: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn init(&self) -> Result<(), JobError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn insert(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError> {
        let mut entry = self.entry.lock().await;
        if entry.contains_key(&job.id) {
            return Err(JobError::Conflict(format!("job {} already exists", job.id)));
        }
        entry.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn find(&self, id: &str) -> Result<PortabilityJob, JobError> {
        self.entry
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }

    async fn update(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError> {
        let mut entry = self.entry.lock().await;
        let stored = entry
            .get(&job.id)
            .ok_or_else(|| JobError::NotFound(job.id.clone()))?;

        if stored.version != job.version {
            tracing::warn!(
                "Stale update for job {}: read version {}, stored version {}",
                job.id,
                job.version,
                stored.version
            );
            return Err(JobError::Conflict(job.id.clone()));
        }

        let mut updated = job;
        updated.version += 1;
        updated.updated_at = Utc::now();
        entry.insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }
}
