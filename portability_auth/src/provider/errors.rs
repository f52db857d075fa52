use thiserror::Error;

use super::PortableDataType;

#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    /// No generator registered for the pair. Missing configuration, never transient.
    #[error("Unsupported provider: {service} for {data_type}")]
    Unsupported {
        service: String,
        data_type: PortableDataType,
    },

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.without_url().to_string())
    }
}
