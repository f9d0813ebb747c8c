//! Shared fixtures: in-memory stores and scripted provider fakes.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use tracksync::domain::errors::SyncError;
use tracksync::domain::models::{
    ExternalIssue, Group, GroupLink, GroupStatus, Integration, LinkedType, Organization,
    OrganizationIntegration, Repo, SubscriptionStatus, User,
};
use tracksync::domain::ports::{
    AnalyticsSink, ExternalIssueStore, GroupLinkStore, GroupStore, Installation,
    InstallationResolver, IntegrationStore, OrganizationStore, PluginMigrator, ProviderClient,
    ProviderSubscription, RepoStore, SyncKind, UserStore,
};

/// In-memory entity store backing every store port.
#[derive(Default)]
pub struct MemStore {
    pub external_issues: Mutex<HashMap<Uuid, ExternalIssue>>,
    pub integrations: Mutex<HashMap<Uuid, Integration>>,
    pub org_integrations: Mutex<Vec<OrganizationIntegration>>,
    pub organizations: Mutex<HashMap<Uuid, Organization>>,
    pub users: Mutex<HashMap<Uuid, User>>,
    pub groups: Mutex<HashMap<Uuid, Group>>,
    pub links: Mutex<Vec<GroupLink>>,
    pub repos: Mutex<HashMap<Uuid, Repo>>,
}

impl MemStore {
    pub fn insert_organization(&self, slug: &str) -> Organization {
        let org = Organization {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
        };
        self.organizations
            .lock()
            .unwrap()
            .insert(org.id, org.clone());
        org
    }

    pub fn insert_integration(&self, integration: Integration) -> Integration {
        self.integrations
            .lock()
            .unwrap()
            .insert(integration.id, integration.clone());
        integration
    }

    pub fn bind_integration(&self, organization_id: Uuid, integration_id: Uuid) {
        self.org_integrations
            .lock()
            .unwrap()
            .push(OrganizationIntegration {
                organization_id,
                integration_id,
            });
    }

    pub fn insert_external_issue(&self, issue: ExternalIssue) -> ExternalIssue {
        self.external_issues
            .lock()
            .unwrap()
            .insert(issue.id, issue.clone());
        issue
    }

    pub fn insert_user(&self, name: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn insert_group(&self, group: Group) -> Group {
        self.groups.lock().unwrap().insert(group.id, group.clone());
        group
    }

    pub fn insert_issue_link(&self, project_id: Uuid, group_id: Uuid, linked_id: Uuid) {
        self.links.lock().unwrap().push(GroupLink {
            project_id,
            group_id,
            linked_type: LinkedType::Issue,
            linked_id,
        });
    }

    pub fn insert_repo(&self, repo: Repo) -> Repo {
        self.repos.lock().unwrap().insert(repo.id, repo.clone());
        repo
    }
}

#[async_trait]
impl ExternalIssueStore for MemStore {
    async fn get(&self, id: Uuid) -> Result<Option<ExternalIssue>, SyncError> {
        Ok(self.external_issues.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl IntegrationStore for MemStore {
    async fn get(&self, id: Uuid) -> Result<Option<Integration>, SyncError> {
        Ok(self.integrations.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, integration: &Integration) -> Result<(), SyncError> {
        self.integrations
            .lock()
            .unwrap()
            .insert(integration.id, integration.clone());
        Ok(())
    }

    async fn list_by_provider(
        &self,
        provider: &str,
    ) -> Result<Vec<OrganizationIntegration>, SyncError> {
        let integrations = self.integrations.lock().unwrap();
        Ok(self
            .org_integrations
            .lock()
            .unwrap()
            .iter()
            .filter(|binding| {
                integrations
                    .get(&binding.integration_id)
                    .is_some_and(|i| i.provider == provider)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GroupStore for MemStore {
    async fn get_with_status(
        &self,
        id: Uuid,
        statuses: &[GroupStatus],
    ) -> Result<Option<Group>, SyncError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .get(&id)
            .filter(|g| statuses.contains(&g.status))
            .cloned())
    }
}

#[async_trait]
impl GroupLinkStore for MemStore {
    async fn issue_links(
        &self,
        project_id: Uuid,
        group_id: Uuid,
    ) -> Result<Vec<GroupLink>, SyncError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| {
                l.project_id == project_id
                    && l.group_id == group_id
                    && l.linked_type == LinkedType::Issue
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RepoStore for MemStore {
    async fn get(&self, id: Uuid) -> Result<Option<Repo>, SyncError> {
        Ok(self.repos.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, repo: &Repo) -> Result<(), SyncError> {
        self.repos.lock().unwrap().insert(repo.id, repo.clone());
        Ok(())
    }
}

#[async_trait]
impl OrganizationStore for MemStore {
    async fn get(&self, id: Uuid) -> Result<Option<Organization>, SyncError> {
        Ok(self.organizations.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>, SyncError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

/// Scripted provider client: returns a configurable subscription status
/// and records renewal calls.
pub struct FakeClient {
    pub subscription_status: Mutex<SubscriptionStatus>,
    pub fail_unauthorized: AtomicBool,
    pub get_calls: AtomicU32,
    pub update_calls: Mutex<Vec<String>>,
}

impl Default for FakeClient {
    fn default() -> Self {
        Self {
            subscription_status: Mutex::new(SubscriptionStatus::Enabled),
            fail_unauthorized: AtomicBool::new(false),
            get_calls: AtomicU32::new(0),
            update_calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProviderClient for FakeClient {
    async fn get_subscription(
        &self,
        _instance: &str,
        subscription_id: &str,
    ) -> Result<ProviderSubscription, SyncError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_unauthorized.load(Ordering::SeqCst) {
            return Err(SyncError::ApiUnauthorized("expired token".into()));
        }
        Ok(ProviderSubscription {
            id: subscription_id.to_string(),
            status: *self.subscription_status.lock().unwrap(),
        })
    }

    async fn update_subscription(
        &self,
        _instance: &str,
        subscription_id: &str,
    ) -> Result<(), SyncError> {
        self.update_calls
            .lock()
            .unwrap()
            .push(subscription_id.to_string());
        Ok(())
    }
}

/// Scripted installation recording every outbound call.
pub struct FakeInstallation {
    pub sync_comment: AtomicBool,
    pub sync_assignee: AtomicBool,
    pub sync_status: AtomicBool,
    pub repo_access: AtomicBool,
    pub metadata_error: Mutex<Option<String>>,
    pub comments: Mutex<Vec<(String, Uuid, String)>>,
    pub assignee_calls: Mutex<Vec<(Uuid, Option<Uuid>, bool)>>,
    pub status_calls: Mutex<Vec<(Uuid, bool, Uuid)>>,
    pub metadata_calls: AtomicU32,
    pub client: Arc<FakeClient>,
}

impl Default for FakeInstallation {
    fn default() -> Self {
        Self {
            sync_comment: AtomicBool::new(true),
            sync_assignee: AtomicBool::new(true),
            sync_status: AtomicBool::new(true),
            repo_access: AtomicBool::new(true),
            metadata_error: Mutex::new(None),
            comments: Mutex::new(Vec::new()),
            assignee_calls: Mutex::new(Vec::new()),
            status_calls: Mutex::new(Vec::new()),
            metadata_calls: AtomicU32::new(0),
            client: Arc::new(FakeClient::default()),
        }
    }
}

impl FakeInstallation {
    pub fn disable_all_sync(&self) {
        self.sync_comment.store(false, Ordering::SeqCst);
        self.sync_assignee.store(false, Ordering::SeqCst);
        self.sync_status.store(false, Ordering::SeqCst);
    }

    pub fn total_outbound_calls(&self) -> usize {
        self.comments.lock().unwrap().len()
            + self.assignee_calls.lock().unwrap().len()
            + self.status_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Installation for FakeInstallation {
    fn should_sync(&self, kind: SyncKind) -> bool {
        match kind {
            SyncKind::Comment => self.sync_comment.load(Ordering::SeqCst),
            SyncKind::OutboundAssignee => self.sync_assignee.load(Ordering::SeqCst),
            SyncKind::OutboundStatus => self.sync_status.load(Ordering::SeqCst),
        }
    }

    async fn create_comment(
        &self,
        external_key: &str,
        user_id: Uuid,
        text: &str,
    ) -> Result<(), SyncError> {
        self.comments
            .lock()
            .unwrap()
            .push((external_key.to_string(), user_id, text.to_string()));
        Ok(())
    }

    async fn sync_assignee_outbound(
        &self,
        external_issue: &ExternalIssue,
        user: Option<&User>,
        assign: bool,
    ) -> Result<(), SyncError> {
        self.assignee_calls.lock().unwrap().push((
            external_issue.id,
            user.map(|u| u.id),
            assign,
        ));
        Ok(())
    }

    async fn sync_status_outbound(
        &self,
        external_issue: &ExternalIssue,
        resolved: bool,
        project_id: Uuid,
    ) -> Result<(), SyncError> {
        self.status_calls
            .lock()
            .unwrap()
            .push((external_issue.id, resolved, project_id));
        Ok(())
    }

    async fn has_repo_access(&self, _repo: &Repo) -> Result<bool, SyncError> {
        Ok(self.repo_access.load(Ordering::SeqCst))
    }

    async fn sync_metadata(&self) -> Result<(), SyncError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.metadata_error.lock().unwrap().clone() {
            return Err(SyncError::Integration(message));
        }
        Ok(())
    }

    fn client(&self) -> Arc<dyn ProviderClient> {
        self.client.clone()
    }

    fn instance(&self) -> &str {
        "example.visualstudio.com"
    }
}

/// Resolver handing out one shared fake installation.
pub struct FakeResolver {
    pub installation: Arc<FakeInstallation>,
}

impl InstallationResolver for FakeResolver {
    fn resolve(
        &self,
        _integration: &Integration,
        _organization_id: Option<Uuid>,
    ) -> Result<Arc<dyn Installation>, SyncError> {
        Ok(self.installation.clone())
    }
}

/// Analytics sink capturing every record.
#[derive(Default)]
pub struct RecordingAnalytics {
    pub records: Mutex<Vec<(String, serde_json::Value)>>,
}

impl AnalyticsSink for RecordingAnalytics {
    fn record(&self, event: &str, fields: serde_json::Value) {
        self.records
            .lock()
            .unwrap()
            .push((event.to_string(), fields));
    }
}

/// Fully wired coordinator over in-memory stores and fakes.
pub struct Fixture {
    pub store: Arc<MemStore>,
    pub installation: Arc<FakeInstallation>,
    pub analytics: Arc<RecordingAnalytics>,
    pub migrator: Arc<RecordingMigrator>,
    pub coordinator: Arc<tracksync::SyncCoordinator>,
}

pub fn fixture(issue_sync_enabled: bool) -> Fixture {
    let store = Arc::new(MemStore::default());
    let installation = Arc::new(FakeInstallation::default());
    let analytics = Arc::new(RecordingAnalytics::default());
    let migrator = Arc::new(RecordingMigrator::default());

    let coordinator = Arc::new(tracksync::SyncCoordinator::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(FakeResolver {
            installation: installation.clone(),
        }),
        Arc::new(tracksync::domain::ports::StaticFeatureGate(
            issue_sync_enabled,
        )),
        analytics.clone(),
        migrator.clone(),
    ));

    Fixture {
        store,
        installation,
        analytics,
        migrator,
        coordinator,
    }
}

/// Plugin migrator recording handoffs.
#[derive(Default)]
pub struct RecordingMigrator {
    pub runs: Mutex<Vec<(Uuid, Uuid)>>,
}

#[async_trait]
impl PluginMigrator for RecordingMigrator {
    async fn run(
        &self,
        integration: &Integration,
        organization: &Organization,
    ) -> Result<(), SyncError> {
        self.runs
            .lock()
            .unwrap()
            .push((integration.id, organization.id));
        Ok(())
    }
}
