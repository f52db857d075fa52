use std::env;
use std::sync::LazyLock;

const DEFAULT_SESSION_TOKEN_SECRET: &str = "default_secret_key_change_in_production";

/// Cookie carrying the job token issued by the job-creation step.
pub static JOB_ID_COOKIE_NAME: LazyLock<String> =
    LazyLock::new(|| cookie_name(env::var("JOB_ID_COOKIE_NAME").ok(), "portability_job_id"));

/// Cookie carrying the token issued after a credential submission.
pub static AUTH_DATA_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    cookie_name(
        env::var("AUTH_DATA_COOKIE_NAME").ok(),
        "portability_auth_data",
    )
});

pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> =
    LazyLock::new(|| cookie_max_age(env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref()));

/// Process-wide secret the session token key is derived from.
/// Read once; rotating it requires a restart.
pub(super) static SESSION_TOKEN_SECRET: LazyLock<Vec<u8>> =
    LazyLock::new(|| token_secret(env::var("SESSION_TOKEN_SECRET").ok()));

fn cookie_name(value: Option<String>, default: &str) -> String {
    value
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn cookie_max_age(value: Option<&str>) -> u64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(600) // Default to 10 minutes if not set or invalid
}

fn token_secret(value: Option<String>) -> Vec<u8> {
    match value {
        Some(secret) if !secret.is_empty() => secret.into_bytes(),
        _ => {
            tracing::warn!("SESSION_TOKEN_SECRET not set, using the built-in default");
            DEFAULT_SESSION_TOKEN_SECRET.as_bytes().to_vec()
        }
    }
}
