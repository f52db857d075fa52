//! Session token sealing and the cookies that carry tokens between steps.

mod codec;
mod config;
mod cookie;
mod errors;
mod types;

pub use codec::SessionTokenCodec;
pub use config::{AUTH_DATA_COOKIE_NAME, JOB_ID_COOKIE_NAME, SESSION_COOKIE_MAX_AGE};
pub use cookie::{prepare_auth_data_cookie_header, prepare_job_id_cookie_header};
pub use errors::SessionError;
pub use types::SessionClaims;
