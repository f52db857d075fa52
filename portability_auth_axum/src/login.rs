use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
};
use axum_extra::{TypedHeader, headers};
use serde::Deserialize;
use std::sync::Arc;

use portability_auth::{
    JOB_ID_COOKIE_NAME, LoginSubmission, LoginSubmitCoordinator, NextStep,
    prepare_auth_data_cookie_header,
};

use super::config::PORTABILITY_BASE_URL;
use super::error::IntoResponseError;

#[derive(Deserialize)]
pub(super) struct SimpleLoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Page the flow continues on after `step`.
pub(super) fn next_step_url(base_url: &str, step: NextStep) -> String {
    match step {
        NextStep::Intermediary => format!("{base_url}/next"),
        NextStep::Completion => format!("{base_url}/copy"),
    }
}

pub(super) async fn simple_login_submit(
    State(coordinator): State<Arc<LoginSubmitCoordinator>>,
    cookies: Option<TypedHeader<headers::Cookie>>,
    Form(form): Form<SimpleLoginForm>,
) -> Result<(HeaderMap, Redirect), (StatusCode, String)> {
    let token = cookies
        .as_ref()
        .and_then(|TypedHeader(cookies)| cookies.get(JOB_ID_COOKIE_NAME.as_str()))
        .ok_or_else(|| {
            tracing::debug!("Submission without {} cookie", *JOB_ID_COOKIE_NAME);
            (StatusCode::BAD_REQUEST, "Missing job cookie".to_string())
        })?;

    let submission = LoginSubmission {
        token: token.to_string(),
        username: form.username,
        password: form.password,
    };

    let outcome = coordinator.submit(&submission).await.into_response_error()?;
    let headers = prepare_auth_data_cookie_header(&outcome.token).into_response_error()?;

    Ok((
        headers,
        Redirect::to(&next_step_url(&PORTABILITY_BASE_URL, outcome.next_step)),
    ))
}
