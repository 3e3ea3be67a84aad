//! Test context for unified test setup
//!
//! Bundles a mock backend, a temporary storage directory and settings
//! pointing at both, and builds the full application context on top.

use std::sync::Arc;
use tempfile::TempDir;

use varta_client::config::{Settings, StaticPosition};
use varta_client::services::PositionProvider;
use varta_client::state::AppContext;

use super::backend_mock::BackendMockServer;

/// Unified test context
pub struct TestContext {
    pub backend: BackendMockServer,
    pub settings: Settings,
    pub temp_dir: TempDir,
}

impl TestContext {
    /// Start a mock backend and derive settings pointing at it
    pub async fn new() -> Self {
        let backend = BackendMockServer::new().await;
        let temp_dir = tempfile::tempdir().expect("temp dir");

        let mut settings = Settings::default();
        settings.api.base_url = backend.api_base_url();
        settings.location.geocode_url = backend.geocode_base_url();
        settings.storage.dir = temp_dir.path().to_string_lossy().to_string();

        Self {
            backend,
            settings,
            temp_dir,
        }
    }

    /// Same, with a static position so the resolver has coordinates
    pub async fn with_position(latitude: f64, longitude: f64) -> Self {
        let mut ctx = Self::new().await;
        ctx.settings.location.static_position = Some(StaticPosition { latitude, longitude });
        ctx
    }

    /// Build the application context (hydrates the session)
    pub async fn app(&self) -> AppContext {
        AppContext::initialize(self.settings.clone())
            .await
            .expect("app context")
    }

    /// Build the application context with an explicit position provider
    pub async fn app_with_provider(&self, provider: Arc<dyn PositionProvider>) -> AppContext {
        AppContext::initialize_with_provider(self.settings.clone(), provider)
            .await
            .expect("app context")
    }
}
