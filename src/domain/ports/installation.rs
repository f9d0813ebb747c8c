//! Provider-side capability ports.
//!
//! An `Installation` is the provider-specific adapter for one
//! (integration, organization) pair: it decides whether a given sync
//! kind is enabled on the provider side and performs the actual API
//! calls. One implementation exists per provider (Jira, VSTS, GitHub,
//! ...), all external to this core.

use std::sync::Arc;

use crate::domain::errors::SyncError;
use crate::domain::models::{ExternalIssue, Integration, Organization, Repo, SubscriptionStatus, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Direction-specific sync capability an installation can opt out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Comment,
    OutboundAssignee,
    OutboundStatus,
}

/// Capability object for one (integration, organization) pair.
#[async_trait]
pub trait Installation: Send + Sync {
    /// Whether the provider-side configuration allows this sync kind.
    fn should_sync(&self, kind: SyncKind) -> bool;

    /// Post a comment on the external issue identified by `external_key`.
    async fn create_comment(
        &self,
        external_key: &str,
        user_id: Uuid,
        text: &str,
    ) -> Result<(), SyncError>;

    /// Mirror an assignee change; `user: None` with `assign == false`
    /// clears the assignee.
    async fn sync_assignee_outbound(
        &self,
        external_issue: &ExternalIssue,
        user: Option<&User>,
        assign: bool,
    ) -> Result<(), SyncError>;

    /// Mirror resolution status onto the external issue.
    async fn sync_status_outbound(
        &self,
        external_issue: &ExternalIssue,
        resolved: bool,
        project_id: Uuid,
    ) -> Result<(), SyncError>;

    /// Whether the installation's credentials can see this repository.
    async fn has_repo_access(&self, repo: &Repo) -> Result<bool, SyncError>;

    /// Refresh provider-side metadata (e.g. Jira field schema).
    async fn sync_metadata(&self) -> Result<(), SyncError>;

    /// Low-level provider client, used by the subscription renewal path.
    fn client(&self) -> Arc<dyn ProviderClient>;

    /// Provider instance this installation talks to, e.g.
    /// `example.visualstudio.com`.
    fn instance(&self) -> &str;
}

/// Resolves the installation for an integration, optionally scoped to an
/// organization (metadata sync resolves without one).
pub trait InstallationResolver: Send + Sync {
    fn resolve(
        &self,
        integration: &Integration,
        organization_id: Option<Uuid>,
    ) -> Result<Arc<dyn Installation>, SyncError>;
}

/// Live subscription state as reported by the provider.
#[derive(Debug, Clone)]
pub struct ProviderSubscription {
    pub id: String,
    pub status: SubscriptionStatus,
}

/// Low-level provider API surface needed by subscription renewal.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn get_subscription(
        &self,
        instance: &str,
        subscription_id: &str,
    ) -> Result<ProviderSubscription, SyncError>;

    /// Replace/re-enable the subscription on the provider side.
    async fn update_subscription(
        &self,
        instance: &str,
        subscription_id: &str,
    ) -> Result<(), SyncError>;
}

/// Hands a migrated repository's organization over to the
/// plugin-to-integration migration flow. External collaborator invoked
/// at the tail of `migrate_repo`.
#[async_trait]
pub trait PluginMigrator: Send + Sync {
    async fn run(
        &self,
        integration: &Integration,
        organization: &Organization,
    ) -> Result<(), SyncError>;
}
