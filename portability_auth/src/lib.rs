//! portability_auth - Credential submission for a data-portability pipeline
//!
//! A user who picked a source or destination service submits raw credentials.
//! This crate finds the job the session token refers to, works out whether
//! the export or the import side is pending, asks the registered generator
//! for that provider to turn the credentials into an [`AuthData`], stores it
//! on the job with an optimistic-concurrency update, and issues a new sealed
//! session token together with the next step of the flow.

mod coordination;
mod job;
mod provider;
mod session;
mod utils;

#[cfg(test)]
mod test_utils;

pub use coordination::{
    CoordinationError, LoginSubmission, LoginSubmitCoordinator, NextStep, SubmitOutcome,
    strip_client_prefix,
};

pub use job::{
    Directionality, InMemoryJobStore, JobAuthState, JobError, JobStore, PortabilityJob,
    PortableDataType, PostgresJobStore, SqliteJobStore, job_store_from_env,
};

pub use provider::{
    AuthData, HttpTokenAuthDataGenerator, OnlineAuthDataGenerator, PasswordAuthDataGenerator,
    ProviderError, ProviderRegistry, ProviderRegistryBuilder,
};

pub use session::{
    AUTH_DATA_COOKIE_NAME, JOB_ID_COOKIE_NAME, SESSION_COOKIE_MAX_AGE, SessionClaims,
    SessionError, SessionTokenCodec, prepare_auth_data_cookie_header, prepare_job_id_cookie_header,
};

pub use utils::{UtilError, gen_job_id};
