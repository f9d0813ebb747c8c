//! Domain models for the tracksync core.

pub mod config;
pub mod external_issue;
pub mod group;
pub mod integration;
pub mod job;
pub mod organization;
pub mod repo;

pub use config::{Config, LoggingConfig, QueueConfig, SweeperConfig};
pub use external_issue::ExternalIssue;
pub use group::{Group, GroupLink, GroupStatus, LinkedType};
pub use integration::{Integration, IntegrationMetadata, Subscription, SubscriptionStatus};
pub use job::{JobKind, JobPayload, QueuedJob};
pub use organization::{Organization, OrganizationIntegration, User};
pub use repo::{Repo, RepoStatus};
