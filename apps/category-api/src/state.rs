//! Application state management.

use database::mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned for each handler; the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
