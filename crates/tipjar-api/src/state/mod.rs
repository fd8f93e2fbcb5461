//! Shared handler state.

use std::sync::Arc;

use tipjar_common::AppConfig;
use tipjar_service::ServiceContext;

/// State cloned into every handler.
///
/// `ServiceContext` is internally reference-counted, so a per-request clone
/// only bumps a handful of `Arc`s.
#[derive(Clone)]
pub struct AppState {
    services: ServiceContext,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            services,
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Config carries store credentials, keep it out of debug output.
        f.debug_struct("AppState")
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}
