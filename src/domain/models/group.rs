use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of an internal issue group.
///
/// Outbound status sync only considers `Unresolved` and `Resolved`; the
/// remaining values are lifecycle sentinels that make a status-sync
/// lookup come back empty (a normal no-op, not a failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Unresolved,
    Resolved,
    Ignored,
    PendingDeletion,
    DeletionInProgress,
    PendingMerge,
}

impl GroupStatus {
    /// The statuses outbound sync is willing to propagate.
    pub const SYNCABLE: &'static [GroupStatus] = &[Self::Unresolved, Self::Resolved];
}

/// An internal issue. Read-only input to status sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub project_id: Uuid,
    pub organization_id: Uuid,
    pub status: GroupStatus,
}

/// What a group link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedType {
    Issue,
    PullRequest,
}

/// Typed link from an internal (project, group) pair to an external
/// record. Fan-out reads links of type `Issue` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupLink {
    pub project_id: Uuid,
    pub group_id: Uuid,
    pub linked_type: LinkedType,
    /// Id of the linked record; an `ExternalIssue` id when
    /// `linked_type == Issue`.
    pub linked_id: Uuid,
}
