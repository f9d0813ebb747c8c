//! Periodic sweep-and-renew for provider webhook subscriptions.
//!
//! A timer submits one sweep job per interval; the sweep scans every
//! (organization, integration) binding for the configured provider and
//! submits one check job per subscription past the staleness threshold.
//! The check fetches live status from the provider and renews only when
//! the platform has disabled the subscription on its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::SyncError;
use crate::domain::models::{JobPayload, SweeperConfig};
use crate::domain::ports::{InstallationResolver, IntegrationStore};
use crate::services::dispatcher::JobQueue;

pub struct SubscriptionSweeper {
    integrations: Arc<dyn IntegrationStore>,
    resolver: Arc<dyn InstallationResolver>,
    queue: JobQueue,
    config: SweeperConfig,
    running: Arc<AtomicBool>,
}

impl SubscriptionSweeper {
    pub fn new(
        integrations: Arc<dyn IntegrationStore>,
        resolver: Arc<dyn InstallationResolver>,
        queue: JobQueue,
        config: SweeperConfig,
    ) -> Self {
        Self {
            integrations,
            resolver,
            queue,
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Scan a provider's subscriptions and submit one check job per
    /// stale one.
    ///
    /// A subscription is stale when it has never been checked or when
    /// its last check is at least the configured threshold old.
    /// Integrations without a subscription record are skipped. Returns
    /// the number of check jobs submitted.
    #[instrument(skip(self))]
    pub async fn sweep(&self, provider: &str) -> Result<usize, SyncError> {
        let bindings = self.integrations.list_by_provider(provider).await?;
        let threshold = chrono::Duration::seconds(
            i64::try_from(self.config.staleness_threshold_secs).unwrap_or(i64::MAX),
        );
        let now = Utc::now();
        let mut submitted = 0;

        for binding in bindings {
            let Some(integration) = self.integrations.get(binding.integration_id).await? else {
                // Deleted since listing; nothing to check.
                continue;
            };
            let Some(subscription) = &integration.metadata.subscription else {
                continue;
            };

            let stale = match subscription.last_check {
                None => true,
                Some(last_check) => now.signed_duration_since(last_check) >= threshold,
            };
            if !stale {
                continue;
            }

            self.queue.submit(JobPayload::SubscriptionCheck {
                integration_id: integration.id,
                organization_id: binding.organization_id,
            });
            submitted += 1;
        }

        debug!(provider, submitted, "subscription sweep complete");
        Ok(submitted)
    }

    /// Health-check one subscription and renew it if the platform
    /// disabled it.
    ///
    /// Only a live status of `disabledBySystem` triggers a write: the
    /// provider-side replace call, then `last_check = now` persisted
    /// into the integration's metadata. Healthy subscriptions cause no
    /// write at all, so repeated checks are free of churn.
    ///
    /// The read-modify-write on the integration carries no version
    /// token; two concurrent checks for the same integration can race
    /// and one timestamp can overwrite the other. Renewal is idempotent
    /// (replacing an already-replaced subscription is a no-op
    /// provider-side) and a lost timestamp only costs one extra check a
    /// sweep later, so the race is tolerated.
    #[instrument(skip(self))]
    pub async fn check_subscription(
        &self,
        integration_id: Uuid,
        organization_id: Uuid,
    ) -> Result<(), SyncError> {
        let mut integration = self
            .integrations
            .get(integration_id)
            .await?
            .ok_or(SyncError::IntegrationNotFound(integration_id))?;

        let Some(subscription) = &integration.metadata.subscription else {
            debug!(%integration_id, "subscription removed since sweep; skipping check");
            return Ok(());
        };
        let subscription_id = subscription.id.clone();

        let installation = self.resolver.resolve(&integration, Some(organization_id))?;
        let client = installation.client();
        let live = client
            .get_subscription(installation.instance(), &subscription_id)
            .await?;

        if live.status.needs_renewal() {
            info!(
                %integration_id,
                subscription_id = %subscription_id,
                status = live.status.as_str(),
                "subscription disabled by platform; renewing"
            );
            client
                .update_subscription(installation.instance(), &subscription_id)
                .await?;

            if let Some(subscription) = integration.metadata.subscription.as_mut() {
                subscription.last_check = Some(Utc::now());
            }
            self.integrations.update(&integration).await?;
        }

        Ok(())
    }

    /// Start the sweep timer: submit one sweep job per interval.
    /// Returns the timer task's handle.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);

        let queue = self.queue.clone();
        let running = self.running.clone();
        let provider = self.config.provider.clone();
        let interval = Duration::from_secs(self.config.interval_secs);

        tokio::spawn(async move {
            while running.load(Ordering::SeqCst) {
                tokio::time::sleep(interval).await;
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                queue.submit(JobPayload::SubscriptionSweep {
                    provider: provider.clone(),
                });
            }
            warn!("subscription sweep timer stopped");
        })
    }

    /// Stop the sweep timer after its current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the sweep timer is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
