//! Application state for the performance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::service::PerformanceService;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the performance service.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    service: Arc<PerformanceService>,
}

impl AppState {
    /// Creates a new application state backed by an in-memory store seeded
    /// from the configured roster.
    pub fn new(config: ConfigLoader) -> Self {
        let service = PerformanceService::from_config(&config);
        Self::with_service(config, service)
    }

    /// Creates a new application state around an existing service.
    pub fn with_service(config: ConfigLoader, service: PerformanceService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the performance service.
    pub fn service(&self) -> &PerformanceService {
        &self.service
    }
}
