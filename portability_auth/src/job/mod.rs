//! Portability job model and its keyed, version-stamped persistence.

mod errors;
mod storage;
mod types;

pub use errors::JobError;
pub use storage::{
    InMemoryJobStore, JobStore, PostgresJobStore, SqliteJobStore, job_store_from_env,
};
pub use types::{Directionality, JobAuthState, PortabilityJob, PortableDataType};
