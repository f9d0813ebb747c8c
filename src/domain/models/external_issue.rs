use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Link between an internal issue group and one issue in an external
/// tracker. At most one exists per (integration, group) pair in normal
/// operation; fan-out tolerates duplicates by processing each
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIssue {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub integration_id: Uuid,
    /// Provider-side issue key, e.g. `PROJ-123`.
    pub key: String,
}

impl ExternalIssue {
    pub fn new(organization_id: Uuid, integration_id: Uuid, key: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id,
            integration_id,
            key: key.into(),
        }
    }
}
