//! Credential submission coordination
//!
//! Ties the job store, the provider registry and the session token codec
//! together into the single pending-auth → authenticated transition.

mod errors;
mod submit;

pub use errors::CoordinationError;
pub use submit::{
    LoginSubmission, LoginSubmitCoordinator, NextStep, SubmitOutcome, strip_client_prefix,
};
