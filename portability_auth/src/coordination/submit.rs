use std::fmt;
use std::sync::Arc;

use crate::job::{Directionality, JobStore};
use crate::provider::ProviderRegistry;
use crate::session::SessionTokenCodec;

use super::errors::CoordinationError;

/// Raw credential submission as received from the login form.
#[derive(Clone)]
pub struct LoginSubmission {
    pub token: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginSubmission").finish_non_exhaustive()
    }
}

/// Where the flow continues once credentials are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Export side authenticated; the user still has to pick/authenticate the import side.
    Intermediary,
    /// Import side authenticated; the copy can start.
    Completion,
}

impl From<Directionality> for NextStep {
    fn from(direction: Directionality) -> Self {
        match direction {
            Directionality::Export => Self::Intermediary,
            Directionality::Import => Self::Completion,
        }
    }
}

pub struct SubmitOutcome {
    pub job_id: String,
    pub direction: Directionality,
    /// Sealed token to hand back to the caller.
    pub token: String,
    pub next_step: NextStep,
}

impl fmt::Debug for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitOutcome")
            .field("job_id", &self.job_id)
            .field("direction", &self.direction)
            .field("next_step", &self.next_step)
            .finish_non_exhaustive()
    }
}

/// Strip the `index:` prefix some form frameworks put in front of option values.
///
/// Everything up to and including the first `:` is dropped and the rest is
/// trimmed; a value without `:` is only trimmed.
pub fn strip_client_prefix(value: &str) -> &str {
    value
        .split_once(':')
        .map_or(value, |(_, rest)| rest)
        .trim()
}

/// Moves a job from pending-auth to authenticated for one directionality.
pub struct LoginSubmitCoordinator {
    store: Arc<dyn JobStore>,
    registry: Arc<ProviderRegistry>,
    codec: Arc<SessionTokenCodec>,
}

impl LoginSubmitCoordinator {
    pub fn new(
        store: Arc<dyn JobStore>,
        registry: Arc<ProviderRegistry>,
        codec: Arc<SessionTokenCodec>,
    ) -> Self {
        Self {
            store,
            registry,
            codec,
        }
    }

    /// Authenticate the pending side of the job referenced by `submission.token`.
    ///
    /// The submission is checked before any collaborator runs. The job's
    /// pending directionality picks the service, the registry picks the
    /// generator, and the artifact is written back with a compare-and-swap
    /// update, so two racing submissions for one job cannot both succeed.
    #[tracing::instrument(skip_all)]
    pub async fn submit(
        &self,
        submission: &LoginSubmission,
    ) -> Result<SubmitOutcome, CoordinationError> {
        if submission.token.is_empty() {
            return Err(
                CoordinationError::InvalidToken("Session token is required".to_string()).log(),
            );
        }
        let username = strip_client_prefix(&submission.username);
        if username.is_empty() {
            return Err(CoordinationError::Validation("Missing valid username".to_string()).log());
        }
        if submission.password.is_empty() {
            return Err(CoordinationError::Validation("Password is empty".to_string()).log());
        }

        let job_id = self.codec.decode(&submission.token)?;
        let job = self.store.find(&job_id).await?;

        let direction = job.pending_directionality()?;
        let service = job.service_for(direction).ok_or_else(|| {
            CoordinationError::Validation(format!(
                "service not found, direction: {direction}, job id: {job_id}"
            ))
            .log()
        })?;
        tracing::debug!(
            "Submission for job {}: service: {}, data type: {}, direction: {}",
            job_id,
            service,
            job.data_type,
            direction
        );

        let generator = self.registry.resolve_generator(service, job.data_type)?;
        let auth_data = generator
            .generate_auth_data(username, &job_id, None, &submission.password)
            .await?;

        let updated = self
            .store
            .update(job.with_auth_data(direction, auth_data))
            .await?;

        let auth_data = match direction {
            Directionality::Export => updated.export_auth_data.as_ref(),
            Directionality::Import => updated.import_auth_data.as_ref(),
        }
        .ok_or_else(|| {
            CoordinationError::Internal("auth data missing after update".to_string()).log()
        })?;
        let token = self.codec.encode(&job_id, direction, auth_data)?;

        tracing::debug!(
            "Job {} authenticated for {}, now at version {}",
            job_id,
            direction,
            updated.version
        );

        Ok(SubmitOutcome {
            job_id,
            direction,
            token,
            next_step: NextStep::from(direction),
        })
    }
}
