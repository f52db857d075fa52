use async_trait::async_trait;

use super::errors::ProviderError;
use super::generator::OnlineAuthDataGenerator;
use super::types::AuthData;

/// Keeps the submitted credentials as the artifact, for providers that are
/// logged into directly by the copy pipeline (IMAP-style services).
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordAuthDataGenerator;

#[async_trait]
impl OnlineAuthDataGenerator for PasswordAuthDataGenerator {
    async fn generate_auth_data(
        &self,
        username: &str,
        job_id: &str,
        initial_auth_data: Option<&AuthData>,
        password: &str,
    ) -> Result<AuthData, ProviderError> {
        if initial_auth_data.is_some() {
            tracing::debug!("Replacing prior credentials for job {}", job_id);
        }
        tracing::debug!("Generated password auth data for job {}", job_id);
        Ok(AuthData::Password {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}
