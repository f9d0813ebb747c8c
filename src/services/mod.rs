pub mod coordinator;
pub mod dispatcher;
pub mod fanout;
pub mod handler;
pub mod retry;
pub mod sweeper;

pub use coordinator::SyncCoordinator;
pub use dispatcher::{JobHandler, JobQueue, JobRegistry, JobSpec, TaskDispatcher};
pub use fanout::FanoutScheduler;
pub use handler::IntegrationJobHandler;
pub use retry::{RetryDecision, RetryPolicy};
pub use sweeper::SubscriptionSweeper;
