//! Job dispatch: explicit registry, submit handle, and worker pool.
//!
//! Every job kind is registered up front in a [`JobRegistry`] mapping
//! kind -> (queue name, retry policy); dispatch is a table lookup, no
//! implicit discovery. Submission is fire-and-forget: no result
//! propagates back to the caller, and at-least-once delivery is assumed,
//! so every job body must be idempotent.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::errors::SyncError;
use crate::domain::models::{JobKind, JobPayload, QueueConfig, QueuedJob};
use crate::services::retry::{RetryDecision, RetryPolicy};

/// Registry entry for one job kind.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Logical queue the kind rides on.
    pub queue: String,
    pub policy: RetryPolicy,
}

/// Mapping from job kind to its spec, constructed once at process start.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    specs: HashMap<JobKind, JobSpec>,
}

impl JobRegistry {
    /// The default registry: every kind on the `integrations` queue
    /// with its standard 5-attempt policy.
    pub fn standard() -> Self {
        Self::from_config(&QueueConfig::default())
    }

    /// Build the registry from queue configuration: every kind rides the
    /// configured queue with the configured attempt budget and its
    /// kind-specific base delay.
    pub fn from_config(config: &QueueConfig) -> Self {
        let specs = JobKind::ALL
            .iter()
            .map(|&kind| {
                (
                    kind,
                    JobSpec {
                        queue: config.name.clone(),
                        policy: RetryPolicy::new(config.max_attempts, kind.base_delay()),
                    },
                )
            })
            .collect();
        Self { specs }
    }

    /// Override one kind's policy (tests shrink delays this way).
    pub fn with_policy(mut self, kind: JobKind, policy: RetryPolicy) -> Self {
        if let Some(spec) = self.specs.get_mut(&kind) {
            spec.policy = policy;
        }
        self
    }

    pub fn spec(&self, kind: JobKind) -> &JobSpec {
        // Every kind is inserted by `standard`; a miss is a programming
        // error caught at startup by `JobKind::ALL` coverage.
        &self.specs[&kind]
    }
}

/// Cheap cloneable submit handle onto the dispatcher's queue.
#[derive(Debug, Clone)]
pub struct JobQueue {
    tx: mpsc::UnboundedSender<QueuedJob>,
}

impl JobQueue {
    /// A queue handle plus the receiving end, for embedding in a
    /// dispatcher or draining directly in tests.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<QueuedJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Submit a job for asynchronous execution. Fire-and-forget.
    pub fn submit(&self, payload: JobPayload) {
        debug!(job = payload.kind().as_str(), "job submitted");
        self.send(QueuedJob::new(payload));
    }

    fn send(&self, job: QueuedJob) {
        let name = job.payload.kind().as_str();
        if self.tx.send(job).is_err() {
            warn!(job = name, "dispatcher stopped; dropping job");
        }
    }
}

/// Executes job payloads. One implementation wires the payloads to the
/// sync services; tests substitute recorders.
#[async_trait::async_trait]
pub trait JobHandler: Send + Sync {
    async fn run(&self, payload: JobPayload) -> Result<(), SyncError>;
}

/// Worker pool that drains the queue and applies retry classification to
/// failures.
pub struct TaskDispatcher {
    registry: Arc<JobRegistry>,
    handler: Arc<dyn JobHandler>,
    queue: JobQueue,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<QueuedJob>>>,
    shutdown_tx: watch::Sender<bool>,
}

impl TaskDispatcher {
    pub fn new(registry: JobRegistry, handler: Arc<dyn JobHandler>) -> Self {
        let (queue, rx) = JobQueue::channel();
        Self::with_queue(registry, handler, queue, rx)
    }

    /// Build around an externally created queue. Hosts whose handler
    /// itself submits jobs (fan-out, sweeper) create the channel first,
    /// wire the services with the `JobQueue`, then hand both ends here.
    pub fn with_queue(
        registry: JobRegistry,
        handler: Arc<dyn JobHandler>,
        queue: JobQueue,
        rx: mpsc::UnboundedReceiver<QueuedJob>,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            registry: Arc::new(registry),
            handler,
            queue,
            rx: Arc::new(Mutex::new(rx)),
            shutdown_tx,
        }
    }

    /// Handle for submitting jobs to this dispatcher.
    pub fn queue(&self) -> JobQueue {
        self.queue.clone()
    }

    /// Spawn `workers` independent worker tasks draining the queue.
    pub fn start(&self, workers: usize) -> Vec<JoinHandle<()>> {
        (0..workers.max(1))
            .map(|worker| {
                let registry = self.registry.clone();
                let handler = self.handler.clone();
                let queue = self.queue.clone();
                let rx = self.rx.clone();
                let mut shutdown = self.shutdown_tx.subscribe();

                tokio::spawn(async move {
                    debug!(worker, "dispatcher worker started");
                    loop {
                        let job = tokio::select! {
                            job = async { rx.lock().await.recv().await } => job,
                            _ = shutdown.changed() => None,
                        };
                        let Some(job) = job else { break };
                        Self::execute(&registry, handler.as_ref(), &queue, job).await;
                    }
                    debug!(worker, "dispatcher worker stopped");
                })
            })
            .collect()
    }

    /// Signal all workers to stop after their current job.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Run one job body and fold its outcome through the retry policy.
    ///
    /// Abort and exclude outcomes terminate the job with a structured
    /// log entry; retryable failures with remaining budget are
    /// re-submitted after the kind's base delay from a detached task so
    /// the worker moves on immediately.
    async fn execute(
        registry: &JobRegistry,
        handler: &dyn JobHandler,
        queue: &JobQueue,
        job: QueuedJob,
    ) {
        let kind = job.payload.kind();
        let spec = registry.spec(kind);

        match handler.run(job.payload.clone()).await {
            Ok(()) => {
                debug!(job = kind.as_str(), attempt = job.attempt, "job completed");
            }
            Err(err) => match kind.classify(&err) {
                RetryDecision::Abort => {
                    info!(
                        job = kind.as_str(),
                        queue = %spec.queue,
                        attempt = job.attempt,
                        error = %err,
                        "job aborted: referenced entity no longer exists"
                    );
                }
                RetryDecision::Exclude => {
                    error!(
                        job = kind.as_str(),
                        queue = %spec.queue,
                        attempt = job.attempt,
                        error = %err,
                        "job failed with non-retryable error"
                    );
                }
                RetryDecision::Retry => {
                    if spec.policy.has_budget(job.attempt) {
                        warn!(
                            job = kind.as_str(),
                            attempt = job.attempt,
                            max_attempts = spec.policy.max_attempts,
                            error = %err,
                            "job failed; re-queueing"
                        );
                        let delay = spec.policy.base_delay;
                        let queue = queue.clone();
                        let next = QueuedJob {
                            payload: job.payload,
                            attempt: job.attempt + 1,
                        };
                        tokio::spawn(async move {
                            tokio::time::sleep(delay).await;
                            queue.send(next);
                        });
                    } else {
                        error!(
                            job = kind.as_str(),
                            attempts = job.attempt,
                            error = %err,
                            "job failed after exhausting attempt budget"
                        );
                    }
                }
            },
        }
    }
}
