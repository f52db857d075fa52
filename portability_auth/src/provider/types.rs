use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider-specific proof of authorization.
///
/// The coordination layer only checks presence; the contents are read by the
/// copy pipeline. `Debug` never prints secret material.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthData {
    Token { token: String },
    TokenSecret { token: String, secret: String },
    Password { username: String, password: String },
}

impl AuthData {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Token { .. } => "token",
            Self::TokenSecret { .. } => "token_secret",
            Self::Password { .. } => "password",
        }
    }
}

impl fmt::Debug for AuthData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthData")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}
