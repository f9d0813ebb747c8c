use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization owning integrations, groups, and repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub slug: String,
}

/// A member whose assignments are mirrored outbound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

/// Join entity binding an integration to an organization. Scanned by the
/// subscription sweeper; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationIntegration {
    pub organization_id: Uuid,
    pub integration_id: Uuid,
}
