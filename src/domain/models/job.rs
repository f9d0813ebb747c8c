//! Job payloads carried on the integrations queue.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of work. Serde-tagged so payloads survive a trip through any
/// at-least-once queue substrate as plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "snake_case")]
pub enum JobPayload {
    /// Mirror an internal comment onto the linked external issue.
    PostComment {
        external_issue_id: Uuid,
        comment: String,
        user_id: Uuid,
    },
    /// Mirror an assignee change; `user_id: None` means unassign.
    SyncAssignee {
        external_issue_id: Uuid,
        user_id: Option<Uuid>,
        assign: bool,
    },
    /// Mirror a group's resolution status onto one linked external issue.
    SyncStatus {
        group_id: Uuid,
        external_issue_id: Uuid,
    },
    /// Refresh provider-side metadata for an integration.
    SyncMetadata { integration_id: Uuid },
    /// Rebind a repository from a plugin to an integration.
    MigrateRepo {
        repo_id: Uuid,
        integration_id: Uuid,
        organization_id: Uuid,
    },
    /// Expand one status-change event into per-link `SyncStatus` jobs.
    StatusSyncFanout { project_id: Uuid, group_id: Uuid },
    /// Health-check (and renew if needed) one integration's subscription.
    SubscriptionCheck {
        integration_id: Uuid,
        organization_id: Uuid,
    },
    /// Scan all of a provider's subscriptions for stale ones.
    SubscriptionSweep { provider: String },
}

/// Discriminant of a `JobPayload`, used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    PostComment,
    SyncAssignee,
    SyncStatus,
    SyncMetadata,
    MigrateRepo,
    StatusSyncFanout,
    SubscriptionCheck,
    SubscriptionSweep,
}

impl JobKind {
    pub const ALL: &'static [JobKind] = &[
        Self::PostComment,
        Self::SyncAssignee,
        Self::SyncStatus,
        Self::SyncMetadata,
        Self::MigrateRepo,
        Self::StatusSyncFanout,
        Self::SubscriptionCheck,
        Self::SubscriptionSweep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PostComment => "post_comment",
            Self::SyncAssignee => "sync_assignee_outbound",
            Self::SyncStatus => "sync_status_outbound",
            Self::SyncMetadata => "sync_metadata",
            Self::MigrateRepo => "migrate_repo",
            Self::StatusSyncFanout => "kick_off_status_syncs",
            Self::SubscriptionCheck => "subscription_check",
            Self::SubscriptionSweep => "kickoff_subscription_check",
        }
    }
}

impl JobPayload {
    pub fn kind(&self) -> JobKind {
        match self {
            Self::PostComment { .. } => JobKind::PostComment,
            Self::SyncAssignee { .. } => JobKind::SyncAssignee,
            Self::SyncStatus { .. } => JobKind::SyncStatus,
            Self::SyncMetadata { .. } => JobKind::SyncMetadata,
            Self::MigrateRepo { .. } => JobKind::MigrateRepo,
            Self::StatusSyncFanout { .. } => JobKind::StatusSyncFanout,
            Self::SubscriptionCheck { .. } => JobKind::SubscriptionCheck,
            Self::SubscriptionSweep { .. } => JobKind::SubscriptionSweep,
        }
    }
}

/// A payload plus its position in the attempt budget. The first
/// execution carries `attempt == 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueuedJob {
    pub payload: JobPayload,
    pub attempt: u32,
}

impl QueuedJob {
    pub fn new(payload: JobPayload) -> Self {
        Self {
            payload,
            attempt: 1,
        }
    }
}
