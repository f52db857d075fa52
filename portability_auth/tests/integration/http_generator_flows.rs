use std::sync::Arc;
use std::time::Duration;

use portability_auth::{
    AuthData, CoordinationError, HttpTokenAuthDataGenerator, InMemoryJobStore, JobStore,
    OnlineAuthDataGenerator, PortableDataType, ProviderError, ProviderRegistry,
};

use crate::common::{MockProvider, coordinator_with, photos_job, submission};

fn generator(mock: &MockProvider) -> HttpTokenAuthDataGenerator {
    HttpTokenAuthDataGenerator::new(mock.endpoint.clone()).unwrap()
}

#[tokio::test]
async fn test_token_issued_for_valid_credentials() {
    let mock = MockProvider::start().await;

    let auth_data = generator(&mock)
        .generate_auth_data("alice", "j1", None, "secret")
        .await
        .unwrap();

    assert_eq!(
        auth_data,
        AuthData::Token {
            token: "tok-alice".to_string()
        }
    );

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].get("job_id").map(String::as_str), Some("j1"));
    assert!(!requests[0].contains_key("prior_token"));
}

#[tokio::test]
async fn test_token_and_secret_issued() {
    let mock = MockProvider::start().await;

    let auth_data = generator(&mock)
        .generate_auth_data("oauth1", "j1", None, "pw")
        .await
        .unwrap();

    assert_eq!(
        auth_data,
        AuthData::TokenSecret {
            token: "tok".to_string(),
            secret: "sec".to_string(),
        }
    );
}

#[tokio::test]
async fn test_prior_token_is_forwarded() {
    let mock = MockProvider::start().await;
    let prior = AuthData::Token {
        token: "earlier".to_string(),
    };

    generator(&mock)
        .generate_auth_data("alice", "j1", Some(&prior), "secret")
        .await
        .unwrap();

    let requests = mock.requests();
    assert_eq!(
        requests[0].get("prior_token").map(String::as_str),
        Some("earlier")
    );
}

#[tokio::test]
async fn test_rejected_credentials() {
    let mock = MockProvider::start().await;
    let generator = generator(&mock);

    let wrong_password = generator
        .generate_auth_data("alice", "j1", None, "nope")
        .await;
    let locked = generator.generate_auth_data("locked", "j1", None, "pw").await;

    assert!(matches!(wrong_password, Err(ProviderError::AuthFailed(_))));
    assert!(matches!(locked, Err(ProviderError::AuthFailed(_))));
}

#[tokio::test]
async fn test_unusable_provider_answers() {
    let mock = MockProvider::start().await;
    let generator = generator(&mock);

    let server_error = generator.generate_auth_data("broken", "j1", None, "pw").await;
    let not_json = generator
        .generate_auth_data("garbage", "j1", None, "pw")
        .await;

    assert!(matches!(server_error, Err(ProviderError::Unavailable(_))));
    assert!(matches!(not_json, Err(ProviderError::Unavailable(_))));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let mock = MockProvider::start().await;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let generator = HttpTokenAuthDataGenerator::with_client(mock.endpoint.clone(), client);

    let result = generator.generate_auth_data("slow", "j1", None, "pw").await;

    assert!(matches!(result, Err(ProviderError::Unavailable(_))));
}

#[tokio::test]
async fn test_submission_through_http_provider() {
    // Given a job whose export service is backed by the mock token endpoint
    let mock = MockProvider::start().await;
    let store = Arc::new(InMemoryJobStore::new());
    store.insert(photos_job("j1")).await.unwrap();
    let registry = ProviderRegistry::builder()
        .register("dropbox", PortableDataType::Photos, Arc::new(generator(&mock)))
        .build();
    let (coordinator, codec) = coordinator_with(store.clone(), registry);
    let token = codec.encode_job_id("j1").unwrap();

    // When the wrong password is submitted first
    let rejected = coordinator
        .submit(&submission(&token, "1:alice", "wrong"))
        .await;

    // Then nothing is stored
    assert!(matches!(rejected, Err(CoordinationError::AuthFailed(_))));
    assert_eq!(store.find("j1").await.unwrap().version, 0);

    // When the right password follows
    let outcome = coordinator
        .submit(&submission(&token, "1:alice", "secret"))
        .await
        .unwrap();

    // Then the provider token lands on the job and in the new session token
    let stored = store.find("j1").await.unwrap();
    let expected = AuthData::Token {
        token: "tok-alice".to_string(),
    };
    assert_eq!(stored.export_auth_data, Some(expected.clone()));
    assert_eq!(
        codec.decode_claims(&outcome.token).unwrap().auth_data,
        Some(expected)
    );

    // And the prefix was stripped before reaching the provider
    assert!(
        mock.requests()
            .iter()
            .all(|r| r.get("username").map(String::as_str) == Some("alice"))
    );
}
