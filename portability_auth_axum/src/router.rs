//! Router for the credential submission endpoint

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use portability_auth::LoginSubmitCoordinator;

use super::config::PORTABILITY_ROUTE_PREFIX;
use super::login::simple_login_submit;

/// Create the router for the submission endpoint
///
/// The endpoint is available at `{PORTABILITY_ROUTE_PREFIX}/simpleLoginSubmit`.
/// Requests are traced at INFO level. Headers are left out of the spans
/// because the job cookie travels in them.
pub fn portability_router(coordinator: Arc<LoginSubmitCoordinator>) -> Router {
    portability_router_no_trace(coordinator).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `portability_router()` without the HTTP tracing middleware.
pub fn portability_router_no_trace(coordinator: Arc<LoginSubmitCoordinator>) -> Router {
    router_at(&PORTABILITY_ROUTE_PREFIX, coordinator)
}

fn router_at(prefix: &str, coordinator: Arc<LoginSubmitCoordinator>) -> Router {
    Router::new()
        .route(
            &format!("{prefix}/simpleLoginSubmit"),
            post(simple_login_submit),
        )
        .with_state(coordinator)
}
