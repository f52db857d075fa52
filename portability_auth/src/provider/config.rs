use std::sync::LazyLock;
use std::time::Duration;

use super::errors::ProviderError;

/// Upper bound for one credential exchange with a provider, in seconds.
pub(super) static PROVIDER_HTTP_TIMEOUT_SECS: LazyLock<u64> = LazyLock::new(|| {
    parse_timeout_secs(std::env::var("PROVIDER_HTTP_TIMEOUT_SECS").ok().as_deref())
});

fn parse_timeout_secs(value: Option<&str>) -> u64 {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or(30)
}

/// Creates the HTTP client used for provider credential exchanges.
///
/// - `timeout`: `PROVIDER_HTTP_TIMEOUT_SECS` (default 30 seconds). A provider
///   that does not answer in time is reported as unavailable.
/// - `pool_idle_timeout`: 90 seconds.
/// - `pool_max_idle_per_host`: 32.
pub(super) fn get_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(*PROVIDER_HTTP_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| ProviderError::Unavailable(format!("Failed to create HTTP client: {e}")))
}
