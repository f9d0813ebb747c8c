//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the surrounding system must implement:
//! - Entity stores: persistence for the records the sync core reads
//! - Installation / ProviderClient: provider-specific API adapters
//! - FeatureGate: per-organization flag evaluation
//! - AnalyticsSink: fire-and-forget audit records
//! - PluginMigrator: plugin-to-integration migration handoff
//!
//! These contracts keep the orchestration core independent of any
//! concrete tracker, database, or flag service.

pub mod analytics;
pub mod feature_gate;
pub mod installation;
pub mod store;

pub use analytics::{AnalyticsSink, NullAnalytics, TracingAnalytics};
pub use feature_gate::{FeatureGate, StaticFeatureGate, ISSUE_SYNC_FLAG};
pub use installation::{
    Installation, InstallationResolver, PluginMigrator, ProviderClient, ProviderSubscription,
    SyncKind,
};
pub use store::{
    ExternalIssueStore, GroupLinkStore, GroupStore, IntegrationStore, OrganizationStore,
    RepoStore, UserStore,
};
