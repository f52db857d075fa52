use async_trait::async_trait;
use http::StatusCode;
use serde::Deserialize;
use url::Url;

use super::config::get_client;
use super::errors::ProviderError;
use super::generator::OnlineAuthDataGenerator;
use super::types::AuthData;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
    #[serde(default)]
    secret: Option<String>,
}

/// Exchanges credentials for a token at a provider's HTTP token endpoint.
///
/// The credentials are posted as a form (`username`, `password`, `job_id`,
/// plus `prior_token` when re-authenticating). A 2xx JSON answer
/// `{"token": "...", "secret": "..."}` becomes the artifact; 401 and 403 mean
/// the provider rejected the credentials; anything else, including timeouts,
/// means the provider is unavailable.
#[derive(Debug, Clone)]
pub struct HttpTokenAuthDataGenerator {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpTokenAuthDataGenerator {
    pub fn new(endpoint: Url) -> Result<Self, ProviderError> {
        Ok(Self::with_client(endpoint, get_client()?))
    }

    pub fn with_client(endpoint: Url, client: reqwest::Client) -> Self {
        Self { endpoint, client }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn prior_token(auth_data: Option<&AuthData>) -> Option<&str> {
    match auth_data? {
        AuthData::Token { token } | AuthData::TokenSecret { token, .. } => Some(token.as_str()),
        AuthData::Password { .. } => None,
    }
}

#[async_trait]
impl OnlineAuthDataGenerator for HttpTokenAuthDataGenerator {
    async fn generate_auth_data(
        &self,
        username: &str,
        job_id: &str,
        initial_auth_data: Option<&AuthData>,
        password: &str,
    ) -> Result<AuthData, ProviderError> {
        let mut form = vec![
            ("username", username),
            ("password", password),
            ("job_id", job_id),
        ];
        if let Some(token) = prior_token(initial_auth_data) {
            form.push(("prior_token", token));
        }

        tracing::debug!(
            "Requesting token from {} for job {}",
            self.endpoint.host_str().unwrap_or_default(),
            job_id
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::debug!("Provider rejected credentials for job {}", job_id);
            return Err(ProviderError::AuthFailed(format!(
                "provider rejected credentials with status {status}"
            )));
        }
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "provider responded with status {status}"
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("Invalid token response: {e}")))?;

        if body.token.is_empty() {
            return Err(ProviderError::Unavailable(
                "provider returned an empty token".to_string(),
            ));
        }

        Ok(match body.secret {
            Some(secret) => AuthData::TokenSecret {
                token: body.token,
                secret,
            },
            None => AuthData::Token { token: body.token },
        })
    }
}
