//! Route and redirect configuration for the axum adapter

use std::sync::LazyLock;

/// Prefix the submission route is mounted under.
/// Default: "" (route at `/simpleLoginSubmit`)
pub static PORTABILITY_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    without_trailing_slash(std::env::var("PORTABILITY_ROUTE_PREFIX").ok())
});

/// Base URL the next-step redirects are built on.
/// Default: "" (redirect to `/next` and `/copy`)
pub static PORTABILITY_BASE_URL: LazyLock<String> =
    LazyLock::new(|| without_trailing_slash(std::env::var("PORTABILITY_BASE_URL").ok()));

fn without_trailing_slash(value: Option<String>) -> String {
    value
        .map(|val| val.trim_end_matches('/').to_string())
        .unwrap_or_default()
}
