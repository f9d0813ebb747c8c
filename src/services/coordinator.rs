//! The sync operations: comment, assignee, status, metadata, and repo
//! migration.
//!
//! All five share one shape: load entities by id (missing ids surface
//! the error the retry table aborts on), check the organization's
//! issue-sync flag, ask the installation whether this sync kind is
//! enabled, perform the side-effecting call, and emit one analytics
//! record on success. Feature-gate-off, `should_sync == false`, and an
//! empty status-restricted group lookup all complete as successful
//! no-ops; combined with the existence checks that makes every body
//! idempotent under at-least-once delivery.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::errors::SyncError;
use crate::domain::models::{
    ExternalIssue, GroupStatus, Integration, Organization, Repo, RepoStatus, User,
};
use crate::domain::ports::{
    AnalyticsSink, ExternalIssueStore, FeatureGate, GroupStore, InstallationResolver,
    IntegrationStore, OrganizationStore, PluginMigrator, RepoStore, SyncKind, UserStore,
    ISSUE_SYNC_FLAG,
};

/// Orchestrates the outbound sync operations against the entity stores
/// and provider installations.
pub struct SyncCoordinator {
    external_issues: Arc<dyn ExternalIssueStore>,
    integrations: Arc<dyn IntegrationStore>,
    organizations: Arc<dyn OrganizationStore>,
    users: Arc<dyn UserStore>,
    groups: Arc<dyn GroupStore>,
    repos: Arc<dyn RepoStore>,
    resolver: Arc<dyn InstallationResolver>,
    gate: Arc<dyn FeatureGate>,
    analytics: Arc<dyn AnalyticsSink>,
    migrator: Arc<dyn PluginMigrator>,
}

impl SyncCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        external_issues: Arc<dyn ExternalIssueStore>,
        integrations: Arc<dyn IntegrationStore>,
        organizations: Arc<dyn OrganizationStore>,
        users: Arc<dyn UserStore>,
        groups: Arc<dyn GroupStore>,
        repos: Arc<dyn RepoStore>,
        resolver: Arc<dyn InstallationResolver>,
        gate: Arc<dyn FeatureGate>,
        analytics: Arc<dyn AnalyticsSink>,
        migrator: Arc<dyn PluginMigrator>,
    ) -> Self {
        Self {
            external_issues,
            integrations,
            organizations,
            users,
            groups,
            repos,
            resolver,
            gate,
            analytics,
            migrator,
        }
    }

    /// Mirror an internal comment onto the linked external issue.
    #[instrument(skip(self, comment))]
    pub async fn post_comment(
        &self,
        external_issue_id: Uuid,
        comment: &str,
        user_id: Uuid,
    ) -> Result<(), SyncError> {
        let external_issue = self.load_external_issue(external_issue_id).await?;
        let organization = self.load_organization(external_issue.organization_id).await?;

        if !self.gate.has(ISSUE_SYNC_FLAG, &organization) {
            return Ok(());
        }

        let integration = self.load_integration(external_issue.integration_id).await?;
        let installation = self
            .resolver
            .resolve(&integration, Some(external_issue.organization_id))?;

        if installation.should_sync(SyncKind::Comment) {
            installation
                .create_comment(&external_issue.key, user_id, comment)
                .await?;
            self.analytics.record(
                "integration.issue.comments.synced",
                json!({
                    "provider": integration.provider,
                    "id": integration.id,
                    "organization_id": external_issue.organization_id,
                    "user_id": user_id,
                }),
            );
        }
        Ok(())
    }

    /// Mirror an assignee change onto the linked external issue.
    /// `user_id: None` means unassign.
    #[instrument(skip(self))]
    pub async fn sync_assignee_outbound(
        &self,
        external_issue_id: Uuid,
        user_id: Option<Uuid>,
        assign: bool,
    ) -> Result<(), SyncError> {
        let external_issue = self.load_external_issue(external_issue_id).await?;
        let organization = self.load_organization(external_issue.organization_id).await?;

        if !self.gate.has(ISSUE_SYNC_FLAG, &organization) {
            return Ok(());
        }

        let integration = self.load_integration(external_issue.integration_id).await?;
        let user = match user_id {
            Some(id) => Some(self.load_user(id).await?),
            None => None,
        };

        let installation = self
            .resolver
            .resolve(&integration, Some(external_issue.organization_id))?;

        if installation.should_sync(SyncKind::OutboundAssignee) {
            installation
                .sync_assignee_outbound(&external_issue, user.as_ref(), assign)
                .await?;
            self.analytics.record(
                "integration.issue.assignee.synced",
                json!({
                    "provider": integration.provider,
                    "id": integration.id,
                    "organization_id": external_issue.organization_id,
                }),
            );
        }
        Ok(())
    }

    /// Mirror a group's resolution status onto one linked external issue.
    ///
    /// The group lookup is restricted to {Unresolved, Resolved}; a group
    /// in any other status (already migrated, pending deletion) comes
    /// back empty and the job completes as a normal no-op.
    #[instrument(skip(self))]
    pub async fn sync_status_outbound(
        &self,
        group_id: Uuid,
        external_issue_id: Uuid,
    ) -> Result<(), SyncError> {
        let Some(group) = self
            .groups
            .get_with_status(group_id, GroupStatus::SYNCABLE)
            .await?
        else {
            return Ok(());
        };

        let organization = self.load_organization(group.organization_id).await?;
        if !self.gate.has(ISSUE_SYNC_FLAG, &organization) {
            return Ok(());
        }

        let external_issue = self.load_external_issue(external_issue_id).await?;
        let integration = self.load_integration(external_issue.integration_id).await?;
        let installation = self
            .resolver
            .resolve(&integration, Some(external_issue.organization_id))?;

        if installation.should_sync(SyncKind::OutboundStatus) {
            installation
                .sync_status_outbound(
                    &external_issue,
                    group.status == GroupStatus::Resolved,
                    group.project_id,
                )
                .await?;
            self.analytics.record(
                "integration.issue.status.synced",
                json!({
                    "provider": integration.provider,
                    "id": integration.id,
                    "organization_id": external_issue.organization_id,
                }),
            );
        }
        Ok(())
    }

    /// Refresh provider-side metadata for an integration.
    ///
    /// Resolved without an organization scope and not feature-gated; a
    /// misconfigured integration surfaces `SyncError::Integration`,
    /// which this kind's policy excludes from retry.
    #[instrument(skip(self))]
    pub async fn sync_metadata(&self, integration_id: Uuid) -> Result<(), SyncError> {
        let integration = self.load_integration(integration_id).await?;
        let installation = self.resolver.resolve(&integration, None)?;
        installation.sync_metadata().await
    }

    /// Rebind a repository from its plugin-era provider to an
    /// integration, then hand the organization to the plugin migration
    /// flow.
    ///
    /// Only acts when the installation can see the repository. The
    /// status flip is one-directional: `Disabled -> Visible` and nothing
    /// else, so a repository hidden or pending deletion for unrelated
    /// reasons is not resurrected.
    #[instrument(skip(self))]
    pub async fn migrate_repo(
        &self,
        repo_id: Uuid,
        integration_id: Uuid,
        organization_id: Uuid,
    ) -> Result<(), SyncError> {
        let integration = self.load_integration(integration_id).await?;
        let installation = self.resolver.resolve(&integration, Some(organization_id))?;
        let mut repo = self.load_repo(repo_id).await?;

        if !installation.has_repo_access(&repo).await? {
            return Ok(());
        }

        // This probably shouldn't happen, but log it just in case.
        if let Some(old_integration_id) = repo.integration_id {
            if old_integration_id != integration_id {
                info!(
                    integration_id = %integration_id,
                    old_integration_id = %old_integration_id,
                    organization_id = %organization_id,
                    repo_id = %repo.id,
                    "repo.migration.integration-change"
                );
            }
        }

        repo.integration_id = Some(integration_id);
        repo.provider = format!("integrations:{}", integration.provider);
        // Check against disabled specifically -- don't want to
        // accidentally un-delete repos.
        if repo.status == RepoStatus::Disabled {
            repo.status = RepoStatus::Visible;
        }
        self.repos.update(&repo).await?;
        info!(
            integration_id = %integration_id,
            organization_id = %organization_id,
            repo_id = %repo.id,
            "repo.migrated"
        );

        let organization = self.load_organization(organization_id).await?;
        self.migrator.run(&integration, &organization).await
    }

    async fn load_external_issue(&self, id: Uuid) -> Result<ExternalIssue, SyncError> {
        self.external_issues
            .get(id)
            .await?
            .ok_or(SyncError::ExternalIssueNotFound(id))
    }

    async fn load_integration(&self, id: Uuid) -> Result<Integration, SyncError> {
        self.integrations
            .get(id)
            .await?
            .ok_or(SyncError::IntegrationNotFound(id))
    }

    async fn load_organization(&self, id: Uuid) -> Result<Organization, SyncError> {
        self.organizations
            .get(id)
            .await?
            .ok_or(SyncError::OrganizationNotFound(id))
    }

    async fn load_user(&self, id: Uuid) -> Result<User, SyncError> {
        self.users.get(id).await?.ok_or(SyncError::UserNotFound(id))
    }

    async fn load_repo(&self, id: Uuid) -> Result<Repo, SyncError> {
        self.repos.get(id).await?.ok_or(SyncError::RepoNotFound(id))
    }
}
