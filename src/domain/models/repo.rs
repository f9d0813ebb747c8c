use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visibility status of a connected repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoStatus {
    Visible,
    Disabled,
    Hidden,
    PendingDeletion,
}

/// A connected source-code repository.
///
/// The only entity this core writes outside the subscription path:
/// `migrate_repo` rebinds it to a new integration and may flip
/// `Disabled` back to `Visible`. Any other status is left alone so a
/// repository disabled for unrelated reasons is not resurrected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    /// Provider tag; rewritten to `integrations:{provider}` on migration.
    pub provider: String,
    pub integration_id: Option<Uuid>,
    pub status: RepoStatus,
}
