//! Job store configuration

use std::{env, str::FromStr, sync::Arc, sync::LazyLock};

use crate::job::errors::JobError;

use super::memory::InMemoryJobStore;
use super::postgres::PostgresJobStore;
use super::sqlite::SqliteJobStore;
use super::store_type::JobStore;

static GENERIC_DATA_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env_or("GENERIC_DATA_STORE_TYPE", "memory"));

static GENERIC_DATA_STORE_URL: LazyLock<String> =
    LazyLock::new(|| env_or("GENERIC_DATA_STORE_URL", "sqlite::memory:"));

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env_or("DB_TABLE_PREFIX", "pa_"));

pub(crate) static DB_TABLE_JOBS: LazyLock<String> =
    LazyLock::new(|| format!("{}jobs", *DB_TABLE_PREFIX));

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build the job store selected by `GENERIC_DATA_STORE_TYPE` and prepare its tables.
pub async fn job_store_from_env() -> Result<Arc<dyn JobStore>, JobError> {
    let store = build_job_store(
        GENERIC_DATA_STORE_TYPE.as_str(),
        GENERIC_DATA_STORE_URL.as_str(),
    )?;
    store.init().await?;
    Ok(store)
}

pub(super) fn build_job_store(
    store_type: &str,
    store_url: &str,
) -> Result<Arc<dyn JobStore>, JobError> {
    tracing::info!("Initializing job store with type: {}", store_type);

    let store: Arc<dyn JobStore> = match store_type {
        "memory" => Arc::new(InMemoryJobStore::new()),
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .map_err(|e| JobError::Storage(format!("Invalid SQLite connection string: {e}")))?
                .create_if_missing(true);
            Arc::new(SqliteJobStore::new(
                sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            ))
        }
        "postgres" => Arc::new(PostgresJobStore::new(
            sqlx::PgPool::connect_lazy(store_url)
                .map_err(|e| JobError::Storage(format!("Failed to create Postgres pool: {e}")))?,
        )),
        t => {
            return Err(JobError::Storage(format!(
                "Unsupported store type: {t}. Supported types are 'memory', 'sqlite' and 'postgres'"
            )));
        }
    };

    Ok(store)
}
