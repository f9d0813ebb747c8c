//! Fan-out: one domain event, N independent sync jobs.

use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::errors::SyncError;
use crate::domain::models::JobPayload;
use crate::domain::ports::GroupLinkStore;
use crate::services::dispatcher::JobQueue;

/// Expands a group status change into one `SyncStatus` job per linked
/// external issue. Runs as a job itself so the event path that observed
/// the status change pays for no link queries.
pub struct FanoutScheduler {
    links: Arc<dyn GroupLinkStore>,
    queue: JobQueue,
}

impl FanoutScheduler {
    pub fn new(links: Arc<dyn GroupLinkStore>, queue: JobQueue) -> Self {
        Self { links, queue }
    }

    /// Submit one status-sync job per issue link of (project, group).
    ///
    /// Zero links submits zero jobs and is not an error. Each job is
    /// retried independently; one link's failure never affects the
    /// others.
    #[instrument(skip(self))]
    pub async fn kick_off_status_syncs(
        &self,
        project_id: Uuid,
        group_id: Uuid,
    ) -> Result<usize, SyncError> {
        let links = self.links.issue_links(project_id, group_id).await?;
        let submitted = links.len();

        for link in links {
            self.queue.submit(JobPayload::SyncStatus {
                group_id,
                external_issue_id: link.linked_id,
            });
        }

        debug!(submitted, "status sync fan-out complete");
        Ok(submitted)
    }
}
