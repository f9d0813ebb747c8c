//! Store ports for the entities the sync core reads (and, narrowly,
//! writes).
//!
//! Missing rows come back as `Ok(None)`; only infrastructure failures
//! surface as `SyncError::Store`. Job bodies turn `None` into the
//! specific missing-entity error their retry policy aborts on.

use crate::domain::errors::SyncError;
use crate::domain::models::{
    ExternalIssue, Group, GroupLink, GroupStatus, Integration, Organization,
    OrganizationIntegration, Repo, User,
};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ExternalIssueStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ExternalIssue>, SyncError>;
}

#[async_trait]
pub trait IntegrationStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Integration>, SyncError>;

    /// Persist a mutated integration (subscription renewal path only).
    async fn update(&self, integration: &Integration) -> Result<(), SyncError>;

    /// All (organization, integration) bindings for one provider tag.
    /// Scanned by the subscription sweeper.
    async fn list_by_provider(
        &self,
        provider: &str,
    ) -> Result<Vec<OrganizationIntegration>, SyncError>;
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Get a group only if its status is one of `statuses`. A group in
    /// any other status comes back as `None`.
    async fn get_with_status(
        &self,
        id: Uuid,
        statuses: &[GroupStatus],
    ) -> Result<Option<Group>, SyncError>;
}

#[async_trait]
pub trait GroupLinkStore: Send + Sync {
    /// All links of type `Issue` for one (project, group) pair.
    async fn issue_links(
        &self,
        project_id: Uuid,
        group_id: Uuid,
    ) -> Result<Vec<GroupLink>, SyncError>;
}

#[async_trait]
pub trait RepoStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Repo>, SyncError>;

    /// Persist a migrated repository.
    async fn update(&self, repo: &Repo) -> Result<(), SyncError>;
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Organization>, SyncError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<User>, SyncError>;
}
