//! Services module
//!
//! This module contains the business logic services built on top of the
//! API client wrapper.

pub mod auth;
pub mod geocode;
pub mod location;
pub mod news;
pub mod reporter;
pub mod ticket;

// Re-export commonly used services
pub use auth::AuthService;
pub use geocode::{GeocodeService, PlaceLabels, GeocodeAddress, GeocodeResponse};
pub use location::{
    LocationService, PositionProvider, PositionOptions, PermissionStatus, ResolverState,
    StaticPositionProvider, DeniedPositionProvider,
    FETCHING_LABEL, PERMISSION_DENIED_LABEL, UNAVAILABLE_LABEL,
};
pub use news::{NewsService, ReviewDecision};
pub use reporter::ReporterService;
pub use ticket::TicketService;

use std::sync::Arc;
use crate::api::ApiClient;
use crate::config::Settings;
use crate::models::Coordinates;
use crate::state::session::SessionStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub news_service: NewsService,
    pub reporter_service: ReporterService,
    pub ticket_service: TicketService,
    pub location_service: LocationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        api: Arc<ApiClient>,
        session: Arc<SessionStore>,
        provider: Arc<dyn PositionProvider>,
    ) -> Result<Self> {
        let geocode_service = GeocodeService::new(
            settings.location.clone(),
            &settings.api.user_agent,
        )?;

        let auth_service = AuthService::new(api.clone(), session);
        let news_service = NewsService::new(api.clone(), settings.features.clone());
        let reporter_service = ReporterService::new(api.clone(), settings.features.clone());
        let ticket_service = TicketService::new(api);
        let location_service =
            LocationService::new(settings.location.clone(), provider, geocode_service);

        Ok(Self {
            auth_service,
            news_service,
            reporter_service,
            ticket_service,
            location_service,
        })
    }

    /// Pick a position provider from settings: static coordinates when
    /// configured, otherwise a denied provider that leaves the feed
    /// unfiltered.
    pub fn default_provider(settings: &Settings) -> Arc<dyn PositionProvider> {
        match settings.location.static_position {
            Some(position) => Arc::new(StaticPositionProvider::new(Coordinates {
                latitude: position.latitude,
                longitude: position.longitude,
            })),
            None => Arc::new(DeniedPositionProvider),
        }
    }

    /// Health summary of the service layer
    pub async fn health_check(&self, settings: &Settings) -> ServiceHealthStatus {
        ServiceHealthStatus {
            location_filtering_enabled: settings.features.location_filtering,
            engagement_enabled: settings.features.engagement,
            admin_panel_enabled: settings.features.admin_panel,
            location_resolved: matches!(
                self.location_service.state().await,
                ResolverState::Resolved(_)
            ),
        }
    }
}

/// Health status for the service layer
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub location_filtering_enabled: bool,
    pub engagement_enabled: bool,
    pub admin_panel_enabled: bool,
    pub location_resolved: bool,
}
