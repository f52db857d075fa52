use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
};
use std::sync::Arc;

use portability_auth::{
    JobStore, PortabilityJob, PortableDataType, SessionTokenCodec, gen_job_id,
    prepare_job_id_cookie_header,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<dyn JobStore>,
    pub(crate) codec: Arc<SessionTokenCodec>,
    pub(crate) submit_url: String,
}

impl AppState {
    /// Create a PHOTOS job from demo-source to demo-destination and return its job token.
    pub(crate) async fn create_job(&self) -> Result<String, String> {
        let job = PortabilityJob::new(
            gen_job_id(),
            PortableDataType::Photos,
            Some("demo-source".to_string()),
            Some("demo-destination".to_string()),
        );
        let job = self.store.insert(job).await.map_err(|e| e.to_string())?;
        tracing::debug!("Created job {}", job.id);
        self.codec.encode_job_id(&job.id).map_err(|e| e.to_string())
    }

    fn login_form(&self, side: &str) -> Html<String> {
        Html(format!(
            r#"<!DOCTYPE html>
<html>
<body>
  <h1>Sign in to the {side} service</h1>
  <form method="post" action="{action}">
    <label>Username <input name="username"></label>
    <label>Password <input name="password" type="password"></label>
    <button type="submit">Continue</button>
  </form>
</body>
</html>"#,
            action = self.submit_url
        ))
    }
}

pub(crate) async fn index(
    State(state): State<AppState>,
) -> Result<(HeaderMap, Html<String>), (StatusCode, String)> {
    let token = state
        .create_job()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let headers = prepare_job_id_cookie_header(&token)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((headers, state.login_form("source")))
}

pub(crate) async fn next(State(state): State<AppState>) -> Html<String> {
    state.login_form("destination")
}

pub(crate) async fn copy() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<body>
  <h1>Both services authenticated</h1>
  <p>The copy can start.</p>
</body>
</html>"#,
    )
}
