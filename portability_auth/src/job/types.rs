use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::provider::AuthData;

use super::errors::JobError;

/// Category of data moved by a portability job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortableDataType {
    Calendar,
    Contacts,
    Mail,
    Photos,
    Tasks,
}

impl PortableDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "CALENDAR",
            Self::Contacts => "CONTACTS",
            Self::Mail => "MAIL",
            Self::Photos => "PHOTOS",
            Self::Tasks => "TASKS",
        }
    }
}

impl fmt::Display for PortableDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortableDataType {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALENDAR" => Ok(Self::Calendar),
            "CONTACTS" => Ok(Self::Contacts),
            "MAIL" => Ok(Self::Mail),
            "PHOTOS" => Ok(Self::Photos),
            "TASKS" => Ok(Self::Tasks),
            other => Err(JobError::InvalidData(format!("Unknown data type: {other}"))),
        }
    }
}

/// Whether a credential submission authenticates the source or the destination service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directionality {
    Export,
    Import,
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Export => f.write_str("export"),
            Self::Import => f.write_str("import"),
        }
    }
}

/// Authentication progress of a job, advanced only by a credential submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAuthState {
    PendingExportAuth,
    PendingImportAuth,
    Authenticated,
}

impl JobAuthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingExportAuth => "pending_export_auth",
            Self::PendingImportAuth => "pending_import_auth",
            Self::Authenticated => "authenticated",
        }
    }
}

impl FromStr for JobAuthState {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_export_auth" => Ok(Self::PendingExportAuth),
            "pending_import_auth" => Ok(Self::PendingImportAuth),
            "authenticated" => Ok(Self::Authenticated),
            other => Err(JobError::InvalidData(format!("Unknown auth state: {other}"))),
        }
    }
}

/// One portability task as persisted in the job store.
///
/// `version` is owned by the store and is compared on every update;
/// callers must pass back the version they read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortabilityJob {
    pub id: String,
    pub data_type: PortableDataType,
    pub export_service: Option<String>,
    pub import_service: Option<String>,
    pub export_auth_data: Option<AuthData>,
    pub import_auth_data: Option<AuthData>,
    pub auth_state: JobAuthState,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PortabilityJob {
    pub fn new(
        id: impl Into<String>,
        data_type: PortableDataType,
        export_service: Option<String>,
        import_service: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            data_type,
            export_service,
            import_service,
            export_auth_data: None,
            import_auth_data: None,
            auth_state: JobAuthState::PendingExportAuth,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Directionality the next credential submission applies to.
    ///
    /// Export while export auth data is absent, import otherwise. The explicit
    /// state has to agree with the auth data fields; a fully authenticated or
    /// inconsistent job accepts no further submissions.
    pub fn pending_directionality(&self) -> Result<Directionality, JobError> {
        let by_fields = if self.export_auth_data.is_none() {
            Directionality::Export
        } else {
            Directionality::Import
        };

        let by_state = match self.auth_state {
            JobAuthState::PendingExportAuth => Directionality::Export,
            JobAuthState::PendingImportAuth => Directionality::Import,
            JobAuthState::Authenticated => {
                return Err(JobError::InvalidState(format!(
                    "job {} is already authenticated",
                    self.id
                )));
            }
        };

        if by_state != by_fields {
            return Err(JobError::InvalidState(format!(
                "job {} is in state {} but auth data says {}",
                self.id,
                self.auth_state.as_str(),
                by_fields
            )));
        }

        if by_state == Directionality::Import && self.import_auth_data.is_some() {
            return Err(JobError::InvalidState(format!(
                "job {} already has import auth data",
                self.id
            )));
        }

        Ok(by_state)
    }

    pub fn service_for(&self, direction: Directionality) -> Option<&str> {
        let service = match direction {
            Directionality::Export => self.export_service.as_deref(),
            Directionality::Import => self.import_service.as_deref(),
        };
        service.filter(|s| !s.is_empty())
    }

    /// Returns a copy with `auth_data` set for `direction` and the state advanced.
    pub fn with_auth_data(&self, direction: Directionality, auth_data: AuthData) -> Self {
        let mut job = self.clone();
        match direction {
            Directionality::Export => {
                job.export_auth_data = Some(auth_data);
                job.auth_state = JobAuthState::PendingImportAuth;
            }
            Directionality::Import => {
                job.import_auth_data = Some(auth_data);
                job.auth_state = JobAuthState::Authenticated;
            }
        }
        job
    }
}
