//! Domain errors for the tracksync synchronization core.

use thiserror::Error;
use uuid::Uuid;

/// Failures a sync job body can surface.
///
/// The retry layer classifies these per job kind: missing-entity variants
/// are typically aborted (the originating event is obsolete), declared
/// integration/API errors are excluded from retry, and everything else is
/// retried up to the job's attempt budget.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("External issue not found: {0}")]
    ExternalIssueNotFound(Uuid),

    #[error("Integration not found: {0}")]
    IntegrationNotFound(Uuid),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Repository not found: {0}")]
    RepoNotFound(Uuid),

    #[error("Integration misconfigured: {0}")]
    Integration(String),

    #[error("Provider rejected credentials: {0}")]
    ApiUnauthorized(String),

    #[error("Provider API error: {0}")]
    Api(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Transient failure: {0}")]
    Transient(String),
}

impl SyncError {
    /// Whether this error means a referenced entity no longer resolves.
    pub fn is_missing_entity(&self) -> bool {
        matches!(
            self,
            Self::ExternalIssueNotFound(_)
                | Self::IntegrationNotFound(_)
                | Self::OrganizationNotFound(_)
                | Self::UserNotFound(_)
                | Self::RepoNotFound(_)
        )
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Transient(err.to_string())
    }
}
