use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Live status of a provider-side webhook subscription.
///
/// Serde renames match the provider's wire strings so a
/// `ProviderClient` response deserializes directly. Anything outside the
/// documented vocabulary lands in `Other` and is treated as healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    #[serde(rename = "enabled")]
    Enabled,
    #[serde(rename = "onProbation")]
    OnProbation,
    #[serde(rename = "disabledBySystem")]
    DisabledBySystem,
    #[serde(rename = "disabledByUser")]
    DisabledByUser,
    #[serde(rename = "disabledByInactiveIdentity")]
    DisabledByInactiveIdentity,
    #[serde(other)]
    Other,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::OnProbation => "onProbation",
            Self::DisabledBySystem => "disabledBySystem",
            Self::DisabledByUser => "disabledByUser",
            Self::DisabledByInactiveIdentity => "disabledByInactiveIdentity",
            Self::Other => "other",
        }
    }

    /// Whether the platform has shut the subscription off on its own.
    /// This is the only status the renewal path acts on.
    pub fn needs_renewal(&self) -> bool {
        matches!(self, Self::DisabledBySystem)
    }
}

/// Webhook subscription state embedded in an integration's metadata.
///
/// Owned exclusively by the integration; only the sweeper/renewal path
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider-side subscription id.
    pub id: String,
    pub status: SubscriptionStatus,
    /// When the sweeper last verified this subscription. Absent on first
    /// run, which the sweeper treats as stale.
    pub last_check: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: SubscriptionStatus::Enabled,
            last_check: None,
        }
    }
}

/// Provider-specific configuration carried by an integration.
///
/// The subscription record gets a typed slot; everything else the
/// provider stashes here stays as an opaque JSON map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A configured connection to an external tracker provider (a specific
/// Jira or VSTS instance, say). Created on install, mutated only through
/// the subscription renewal path, never deleted by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: Uuid,
    /// Provider tag, e.g. `jira`, `vsts`, `github`.
    pub provider: String,
    pub metadata: IntegrationMetadata,
}

impl Integration {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider: provider.into(),
            metadata: IntegrationMetadata::default(),
        }
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.metadata.subscription = Some(subscription);
        self
    }
}
