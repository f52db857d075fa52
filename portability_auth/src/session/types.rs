use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::job::Directionality;
use crate::provider::AuthData;

/// Everything sealed inside a session token.
///
/// A freshly issued job token carries only `job_id`; after a credential
/// submission it also carries the artifact and the directionality it
/// authenticates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Directionality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_data: Option<AuthData>,
    pub issued_at: DateTime<Utc>,
}
