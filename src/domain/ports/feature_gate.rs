//! Feature-flag evaluation port.

use crate::domain::models::Organization;

/// Flag gating every issue-sync operation for an organization.
pub const ISSUE_SYNC_FLAG: &str = "integrations-issue-sync";

/// External feature-flag evaluator.
pub trait FeatureGate: Send + Sync {
    fn has(&self, flag: &str, organization: &Organization) -> bool;
}

/// Gate that answers the same for every flag. Useful as a default and in
/// tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticFeatureGate(pub bool);

impl FeatureGate for StaticFeatureGate {
    fn has(&self, _flag: &str, _organization: &Organization) -> bool {
        self.0
    }
}
