//! portability_auth_axum - Axum transport for credential submission
//!
//! Mounts `POST {PORTABILITY_ROUTE_PREFIX}/simpleLoginSubmit`, which reads the
//! job token from its cookie, runs the submission through
//! [`portability_auth::LoginSubmitCoordinator`], sets the new token as a
//! cookie and redirects to the next step of the flow.

mod config;
mod error;
mod login;
mod router;

pub use config::{PORTABILITY_BASE_URL, PORTABILITY_ROUTE_PREFIX};
pub use error::IntoResponseError;
pub use router::{portability_router, portability_router_no_trace};

// Re-export the coordinator so applications need only this crate to mount the route
pub use portability_auth::LoginSubmitCoordinator;
