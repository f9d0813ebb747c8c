//! Domain layer for the tracksync core
//!
//! Pure models, the error taxonomy, and the port traits external
//! collaborators implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{SyncError, SyncResult};
