use async_trait::async_trait;

use super::errors::ProviderError;
use super::types::AuthData;

/// Turns user-supplied credentials into an [`AuthData`] for one provider.
///
/// Callers validate that `username` and `password` are non-empty before
/// calling. `job_id` is for correlation only. `initial_auth_data` is `None`
/// unless a prior artifact is being refreshed.
///
/// Implementations must not write job state.
#[async_trait]
pub trait OnlineAuthDataGenerator: Send + Sync {
    async fn generate_auth_data(
        &self,
        username: &str,
        job_id: &str,
        initial_auth_data: Option<&AuthData>,
        password: &str,
    ) -> Result<AuthData, ProviderError>;
}
