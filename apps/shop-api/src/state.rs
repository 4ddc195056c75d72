//! Shared application state handed to the route builders.

use mongodb::{Client, Database};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Cloneable handle over the shared connection pool
    pub mongo_client: Client,
    pub db: Database,
}
