//! Axum-based mock provider token endpoint
//!
//! Each test starts its own server on an ephemeral port so tests stay
//! independent. Behavior is keyed on the submitted username:
//!
//! | username   | response                                   |
//! |------------|--------------------------------------------|
//! | `alice`    | 200 `{"token": "tok-alice"}` if password is `secret`, else 401 |
//! | `oauth1`   | 200 `{"token": "tok", "secret": "sec"}`     |
//! | `locked`   | 403                                        |
//! | `broken`   | 500                                        |
//! | `garbage`  | 200 with a non-JSON body                   |
//! | `slow`     | answers after two seconds                  |

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use url::Url;

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub struct MockProvider {
    pub endpoint: Url,
    state: MockState,
}

impl MockProvider {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/token", post(token))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock provider");
        });

        Self {
            endpoint: Url::parse(&format!("http://{addr}/token")).expect("endpoint url"),
            state,
        }
    }

    /// Form bodies received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.state.requests.lock().expect("requests lock").clone()
    }
}

async fn token(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(form.clone());

    let username = form.get("username").map(String::as_str).unwrap_or_default();
    let password = form.get("password").map(String::as_str).unwrap_or_default();

    match username {
        "alice" if password == "secret" => Json(json!({ "token": "tok-alice" })).into_response(),
        "alice" => StatusCode::UNAUTHORIZED.into_response(),
        "oauth1" => Json(json!({ "token": "tok", "secret": "sec" })).into_response(),
        "locked" => StatusCode::FORBIDDEN.into_response(),
        "garbage" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "token": "late" })).into_response()
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
