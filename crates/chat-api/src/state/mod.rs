//! Application state
//!
//! Shared by every handler: the service context and the loaded configuration.

use std::sync::Arc;

use chat_common::{AppConfig, JwtService};
use chat_service::{EventHub, ServiceContext};

#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Verifies identity-provider bearer tokens
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }

    pub fn event_hub(&self) -> &EventHub {
        self.service_context.event_hub()
    }

    /// Where the invite page sends visitors without a profile
    pub fn sign_in_url(&self) -> &str {
        &self.config.auth.sign_in_url
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("app", &self.config.app.name)
            .finish()
    }
}
