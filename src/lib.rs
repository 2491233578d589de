pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use services::gateway::QueryGateway;
use services::registry::PageRegistry;

/// Shared application state passed to all Axum handlers.
///
/// The registry is frozen at boot; handlers only read from it.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<PageRegistry>,
    pub gateway: Arc<dyn QueryGateway>,
    pub config: config::AppConfig,
}
