//! Wires queued payloads to the services that execute them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::SyncError;
use crate::domain::models::JobPayload;
use crate::services::coordinator::SyncCoordinator;
use crate::services::dispatcher::JobHandler;
use crate::services::fanout::FanoutScheduler;
use crate::services::sweeper::SubscriptionSweeper;

/// The production job handler: dispatches each payload variant to the
/// coordinator, fan-out scheduler, or sweeper.
pub struct IntegrationJobHandler {
    coordinator: Arc<SyncCoordinator>,
    fanout: Arc<FanoutScheduler>,
    sweeper: Arc<SubscriptionSweeper>,
}

impl IntegrationJobHandler {
    pub fn new(
        coordinator: Arc<SyncCoordinator>,
        fanout: Arc<FanoutScheduler>,
        sweeper: Arc<SubscriptionSweeper>,
    ) -> Self {
        Self {
            coordinator,
            fanout,
            sweeper,
        }
    }
}

#[async_trait]
impl JobHandler for IntegrationJobHandler {
    async fn run(&self, payload: JobPayload) -> Result<(), SyncError> {
        match payload {
            JobPayload::PostComment {
                external_issue_id,
                comment,
                user_id,
            } => {
                self.coordinator
                    .post_comment(external_issue_id, &comment, user_id)
                    .await
            }
            JobPayload::SyncAssignee {
                external_issue_id,
                user_id,
                assign,
            } => {
                self.coordinator
                    .sync_assignee_outbound(external_issue_id, user_id, assign)
                    .await
            }
            JobPayload::SyncStatus {
                group_id,
                external_issue_id,
            } => {
                self.coordinator
                    .sync_status_outbound(group_id, external_issue_id)
                    .await
            }
            JobPayload::SyncMetadata { integration_id } => {
                self.coordinator.sync_metadata(integration_id).await
            }
            JobPayload::MigrateRepo {
                repo_id,
                integration_id,
                organization_id,
            } => {
                self.coordinator
                    .migrate_repo(repo_id, integration_id, organization_id)
                    .await
            }
            JobPayload::StatusSyncFanout {
                project_id,
                group_id,
            } => self
                .fanout
                .kick_off_status_syncs(project_id, group_id)
                .await
                .map(|_| ()),
            JobPayload::SubscriptionCheck {
                integration_id,
                organization_id,
            } => {
                self.sweeper
                    .check_subscription(integration_id, organization_id)
                    .await
            }
            JobPayload::SubscriptionSweep { provider } => {
                self.sweeper.sweep(&provider).await.map(|_| ())
            }
        }
    }
}
