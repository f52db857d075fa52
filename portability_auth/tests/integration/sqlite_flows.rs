use std::sync::Arc;

use portability_auth::{
    CoordinationError, Directionality, JobAuthState, JobError, JobStore, PasswordAuthDataGenerator,
    PortableDataType, ProviderRegistry, SqliteJobStore,
};
use sqlx::sqlite::SqlitePoolOptions;

use crate::common::{coordinator_with, photos_job, submission};

async fn sqlite_store() -> Arc<SqliteJobStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteJobStore::new(pool);
    store.init().await.unwrap();
    Arc::new(store)
}

#[tokio::test]
async fn test_full_flow_on_sqlite() {
    let store = sqlite_store().await;
    store.insert(photos_job("sq1")).await.unwrap();
    let registry = ProviderRegistry::builder()
        .register(
            "dropbox",
            PortableDataType::Photos,
            Arc::new(PasswordAuthDataGenerator),
        )
        .register(
            "drive",
            PortableDataType::Photos,
            Arc::new(PasswordAuthDataGenerator),
        )
        .build();
    let (coordinator, codec) = coordinator_with(store.clone(), registry);

    let first = coordinator
        .submit(&submission(
            &codec.encode_job_id("sq1").unwrap(),
            "alice",
            "pw1",
        ))
        .await
        .unwrap();
    assert_eq!(first.direction, Directionality::Export);

    let after_export = store.find("sq1").await.unwrap();
    assert_eq!(after_export.auth_state, JobAuthState::PendingImportAuth);
    assert!(after_export.export_auth_data.is_some());
    assert!(after_export.import_auth_data.is_none());

    let second = coordinator
        .submit(&submission(&first.token, "bob", "pw2"))
        .await
        .unwrap();
    assert_eq!(second.direction, Directionality::Import);

    let done = store.find("sq1").await.unwrap();
    assert_eq!(done.auth_state, JobAuthState::Authenticated);
    assert_eq!(done.version, 2);
}

#[tokio::test]
async fn test_stale_update_on_sqlite() {
    let store = sqlite_store().await;
    store.insert(photos_job("sq2")).await.unwrap();

    let read_a = store.find("sq2").await.unwrap();
    let read_b = store.find("sq2").await.unwrap();

    store.update(read_a).await.unwrap();
    let result = store.update(read_b).await;

    assert!(matches!(result, Err(JobError::Conflict(_))));
}

#[tokio::test]
async fn test_unknown_job_on_sqlite() {
    let store = sqlite_store().await;
    let (coordinator, codec) = coordinator_with(store, ProviderRegistry::default());

    let result = coordinator
        .submit(&submission(
            &codec.encode_job_id("ghost").unwrap(),
            "alice",
            "pw",
        ))
        .await;

    assert!(matches!(result, Err(CoordinationError::NotFound { .. })));
}
