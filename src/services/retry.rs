//! Failure classification and retry budgets.
//!
//! Classification is a pure function of (job kind, error), independent
//! of the execution engine. Each job kind declares which missing
//! entities abort it and which declared errors are excluded from retry;
//! everything else is retryable up to a fixed attempt budget with a
//! fixed base delay (the queue adds no exponential growth on top).

use std::time::Duration;

use crate::domain::errors::SyncError;
use crate::domain::models::JobKind;

/// Outcome of classifying a job failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Precondition permanently false (entity deleted between enqueue
    /// and execution). Drop silently; the source event is meaningless.
    Abort,
    /// Declared non-retryable condition (bad credentials, structurally
    /// invalid configuration). Logged for operators, never re-queued.
    Exclude,
    /// Possibly transient. Re-queue until the attempt budget runs out.
    Retry,
}

impl JobKind {
    /// Classify a failure raised by this job kind's body.
    pub fn classify(&self, error: &SyncError) -> RetryDecision {
        match self {
            Self::PostComment | Self::SyncStatus => match error {
                SyncError::ExternalIssueNotFound(_) | SyncError::IntegrationNotFound(_) => {
                    RetryDecision::Abort
                }
                _ => RetryDecision::Retry,
            },
            Self::SyncAssignee => match error {
                SyncError::ExternalIssueNotFound(_)
                | SyncError::IntegrationNotFound(_)
                | SyncError::UserNotFound(_)
                | SyncError::OrganizationNotFound(_) => RetryDecision::Abort,
                _ => RetryDecision::Retry,
            },
            Self::SyncMetadata => match error {
                SyncError::IntegrationNotFound(_) => RetryDecision::Abort,
                SyncError::Integration(_) => RetryDecision::Exclude,
                _ => RetryDecision::Retry,
            },
            Self::MigrateRepo => match error {
                SyncError::IntegrationNotFound(_)
                | SyncError::RepoNotFound(_)
                | SyncError::OrganizationNotFound(_) => RetryDecision::Abort,
                _ => RetryDecision::Retry,
            },
            Self::SubscriptionCheck => match error {
                SyncError::IntegrationNotFound(_) | SyncError::OrganizationNotFound(_) => {
                    RetryDecision::Abort
                }
                // A broken credential will not heal via immediate retry.
                SyncError::Api(_) | SyncError::ApiUnauthorized(_) => RetryDecision::Exclude,
                _ => RetryDecision::Retry,
            },
            // Fan-out and sweep kickoffs reference no single entity and
            // declare no exclusions.
            Self::StatusSyncFanout | Self::SubscriptionSweep => RetryDecision::Retry,
        }
    }

    /// Base delay between attempts for this kind.
    pub fn base_delay(&self) -> Duration {
        match self {
            Self::SyncMetadata => Duration::from_secs(20),
            _ => Duration::from_secs(60 * 5),
        }
    }
}

/// Attempt budget and spacing for one job kind.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total executions allowed, first attempt included.
    pub max_attempts: u32,
    /// Fixed delay before each re-queue.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Whether a retryable failure on attempt `attempt` still has budget
    /// for another execution.
    pub fn has_budget(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
