//! Application context
//!
//! Explicit application-scoped state passed to whatever drives the UI,
//! instead of ambient globals. Construction hydrates the session before
//! returning, so the navigation root never has to guess the auth state.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::models::NewsFilters;
use crate::services::{PositionProvider, ServiceFactory};
use crate::state::session::SessionStore;
use crate::state::storage::SessionStorage;
use crate::utils::errors::Result;

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub storage: Arc<SessionStorage>,
    pub session: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub services: Arc<ServiceFactory>,
}

impl AppContext {
    /// Build the full context with the provider chosen from settings
    pub async fn initialize(settings: Settings) -> Result<Self> {
        let provider = ServiceFactory::default_provider(&settings);
        Self::initialize_with_provider(settings, provider).await
    }

    /// Build the full context with an explicit position provider.
    /// The session is hydrated before this returns.
    pub async fn initialize_with_provider(
        settings: Settings,
        provider: Arc<dyn PositionProvider>,
    ) -> Result<Self> {
        let storage = Arc::new(SessionStorage::new(&settings.storage));
        let session = Arc::new(SessionStore::new(storage.clone()));
        let api = Arc::new(ApiClient::new(&settings, storage.clone())?);
        let services = Arc::new(ServiceFactory::new(
            settings.clone(),
            api.clone(),
            session.clone(),
            provider,
        )?);

        session.hydrate().await;

        Ok(Self {
            settings,
            storage,
            session,
            api,
            services,
        })
    }

    /// Feed filters derived from the current location resolution.
    /// Returns an unfiltered query when location filtering is disabled
    /// or the resolver is in any non-resolved state.
    pub async fn feed_filters(&self) -> NewsFilters {
        let mut filters = NewsFilters::default();
        if self.settings.features.location_filtering {
            filters.district = self.services.location_service.district_filter().await;
        }
        filters
    }
}
