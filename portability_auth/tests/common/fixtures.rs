use std::sync::Arc;

use portability_auth::{
    JobStore, LoginSubmission, LoginSubmitCoordinator, PortabilityJob, PortableDataType,
    ProviderRegistry, SessionTokenCodec,
};

const TEST_SECRET: &[u8] = b"integration-test-session-secret";

/// `{id, PHOTOS, export: dropbox, import: drive}` with no auth data.
pub fn photos_job(id: &str) -> PortabilityJob {
    PortabilityJob::new(
        id,
        PortableDataType::Photos,
        Some("dropbox".to_string()),
        Some("drive".to_string()),
    )
}

pub fn submission(token: &str, username: &str, password: &str) -> LoginSubmission {
    LoginSubmission {
        token: token.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}

pub fn coordinator_with(
    store: Arc<dyn JobStore>,
    registry: ProviderRegistry,
) -> (LoginSubmitCoordinator, Arc<SessionTokenCodec>) {
    let codec = Arc::new(SessionTokenCodec::new(TEST_SECRET).expect("codec"));
    (
        LoginSubmitCoordinator::new(store, Arc::new(registry), codec.clone()),
        codec,
    )
}
