//! Shared collaborators for unit tests across the crate.
//!
//! The recording store and generators count every call so tests can prove
//! which collaborators a submission touched.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::job::{InMemoryJobStore, JobError, JobStore, PortabilityJob, PortableDataType};
use crate::provider::{AuthData, OnlineAuthDataGenerator, ProviderError};
use crate::session::SessionTokenCodec;

pub(crate) const TEST_SECRET: &[u8] = b"unit-test-session-secret";

pub(crate) fn codec() -> SessionTokenCodec {
    SessionTokenCodec::new(TEST_SECRET).expect("test codec")
}

/// `{id, PHOTOS, export: dropbox, import: drive}` with no auth data.
pub(crate) fn photos_job(id: &str) -> PortabilityJob {
    PortabilityJob::new(
        id,
        PortableDataType::Photos,
        Some("dropbox".to_string()),
        Some("drive".to_string()),
    )
}

pub(crate) struct RecordingJobStore {
    inner: InMemoryJobStore,
    find_calls: AtomicUsize,
    update_calls: AtomicUsize,
    bump_after_find: Mutex<HashSet<String>>,
}

impl RecordingJobStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: InMemoryJobStore::new(),
            find_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            bump_after_find: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) async fn seed(&self, job: PortabilityJob) {
        self.inner.insert(job).await.expect("seed job");
    }

    /// Read without counting as a collaborator call.
    pub(crate) async fn snapshot(&self, id: &str) -> Option<PortabilityJob> {
        self.inner.find(id).await.ok()
    }

    /// Simulate another writer landing right after the next read of `id`.
    pub(crate) async fn bump_version_after_find(&self, id: &str) {
        self.bump_after_find.lock().await.insert(id.to_string());
    }

    pub(crate) fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobStore for RecordingJobStore {
    async fn init(&self) -> Result<(), JobError> {
        Ok(())
    }

    async fn insert(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError> {
        self.inner.insert(job).await
    }

    async fn find(&self, id: &str) -> Result<PortabilityJob, JobError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let job = self.inner.find(id).await?;
        if self.bump_after_find.lock().await.remove(id) {
            self.inner.update(job.clone()).await?;
        }
        Ok(job)
    }

    async fn update(&self, job: PortabilityJob) -> Result<PortabilityJob, JobError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update(job).await
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GeneratorCall {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) job_id: String,
    pub(crate) had_initial_auth_data: bool,
}

/// Succeeds with a fixed token and records every call.
pub(crate) struct RecordingGenerator {
    token: String,
    calls: StdMutex<Vec<GeneratorCall>>,
}

impl RecordingGenerator {
    pub(crate) fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            calls: StdMutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl OnlineAuthDataGenerator for RecordingGenerator {
    async fn generate_auth_data(
        &self,
        username: &str,
        job_id: &str,
        initial_auth_data: Option<&AuthData>,
        password: &str,
    ) -> Result<AuthData, ProviderError> {
        self.calls.lock().expect("calls lock").push(GeneratorCall {
            username: username.to_string(),
            password: password.to_string(),
            job_id: job_id.to_string(),
            had_initial_auth_data: initial_auth_data.is_some(),
        });
        Ok(AuthData::Token {
            token: self.token.clone(),
        })
    }
}

pub(crate) struct FailingGenerator {
    error: ProviderError,
}

impl FailingGenerator {
    pub(crate) fn auth_failed() -> Self {
        Self {
            error: ProviderError::AuthFailed("bad credentials".to_string()),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            error: ProviderError::Unavailable("timed out".to_string()),
        }
    }
}

#[async_trait]
impl OnlineAuthDataGenerator for FailingGenerator {
    async fn generate_auth_data(
        &self,
        _username: &str,
        _job_id: &str,
        _initial_auth_data: Option<&AuthData>,
        _password: &str,
    ) -> Result<AuthData, ProviderError> {
        Err(self.error.clone())
    }
}
