//! Tracksync - background synchronization core for external
//! issue-tracker integrations.
//!
//! Reconciles state between internal issue records and pluggable
//! external trackers (comments, assignees, resolution status) and keeps
//! long-lived webhook subscriptions healthy. The heart of the crate is
//! the orchestration layer: classifying failures into abort / excluded /
//! retryable, dispatching fire-and-forget jobs over a worker pool,
//! fanning one domain event out into independent per-link sync jobs,
//! and periodically sweeping subscriptions for stale ones.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): entities, the error taxonomy, and the
//!   port traits external collaborators implement (stores, provider
//!   installations, feature gate, analytics sink)
//! - **Service Layer** (`services`): retry classification, the job
//!   dispatcher, the sync coordinator, fan-out, and the subscription
//!   sweeper
//! - **Infrastructure Layer** (`infrastructure`): config loading and
//!   logging setup
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tracksync::services::{IntegrationJobHandler, JobRegistry, TaskDispatcher};
//!
//! # fn wire(handler: Arc<IntegrationJobHandler>) {
//! let dispatcher = TaskDispatcher::new(JobRegistry::standard(), handler);
//! let queue = dispatcher.queue();
//! let workers = dispatcher.start(4);
//! # }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{SyncError, SyncResult};
pub use domain::models::{
    Config, ExternalIssue, Group, GroupLink, GroupStatus, Integration, JobKind, JobPayload,
    LinkedType, Organization, OrganizationIntegration, QueuedJob, Repo, RepoStatus, Subscription,
    SubscriptionStatus, User,
};
pub use domain::ports::{
    AnalyticsSink, FeatureGate, Installation, InstallationResolver, PluginMigrator,
    ProviderClient, ProviderSubscription, SyncKind, ISSUE_SYNC_FLAG,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    FanoutScheduler, IntegrationJobHandler, JobQueue, JobRegistry, RetryDecision, RetryPolicy,
    SubscriptionSweeper, SyncCoordinator, TaskDispatcher,
};
