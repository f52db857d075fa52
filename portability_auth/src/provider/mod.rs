//! Pluggable per-provider authentication-data generation and its registry.

mod config;
mod errors;
mod generator;
mod http_token;
mod password;
mod registry;
mod types;

use crate::job::PortableDataType;

pub use errors::ProviderError;
pub use generator::OnlineAuthDataGenerator;
pub use http_token::HttpTokenAuthDataGenerator;
pub use password::PasswordAuthDataGenerator;
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
pub use types::AuthData;
