//! Location resolution service
//!
//! Obtains the device position (with user consent), reverse-geocodes it
//! into a district/city label and feeds the result to the news query
//! layer. District filtering is a nice-to-have: every failure mode here
//! degrades to "show all news", never to a blocked feed.
//!
//! The position source is a trait seam so desktop builds and tests can
//! inject their own; the crate ships a static provider (fixed
//! coordinates from config) and a denied provider for environments with
//! no position source at all.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::LocationConfig;
use crate::models::{Coordinates, LocationSnapshot};
use crate::services::geocode::GeocodeService;
use crate::utils::errors::{VartaError, Result};
use crate::utils::logging::log_location_event;

/// Placeholder label before the first resolution completes
pub const FETCHING_LABEL: &str = "Fetching...";
/// Label shown when the user refused the location permission
pub const PERMISSION_DENIED_LABEL: &str = "Permission denied";
/// Label shown when the position fetch failed
pub const UNAVAILABLE_LABEL: &str = "Unavailable";

/// Outcome of an OS-level permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Options forwarded to the position source
#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    /// Bounded timeout for the fetch itself
    pub timeout: Duration,
    /// Cache tolerance: a fix no older than this may be reused
    pub maximum_age: Duration,
}

/// Source of device positions. The OS geolocation API on mobile; a
/// static or scripted implementation elsewhere.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    /// Request the location permission from the user/OS
    async fn request_permission(&self) -> PermissionStatus;

    /// Fetch the current position
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates>;
}

/// Provider pinned to fixed coordinates from configuration
#[derive(Debug, Clone, Copy)]
pub struct StaticPositionProvider {
    coordinates: Coordinates,
}

impl StaticPositionProvider {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl PositionProvider for StaticPositionProvider {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        Ok(self.coordinates)
    }
}

/// Provider for environments with no position source; behaves like a
/// denied permission so the feed stays unfiltered.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedPositionProvider;

#[async_trait]
impl PositionProvider for DeniedPositionProvider {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        Err(VartaError::PermissionDenied)
    }
}

/// Resolution state exposed to consumers
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverState {
    Uninitialized,
    Fetching,
    /// Terminal for this session unless a refresh re-requests permission
    PermissionDenied,
    Resolved(LocationSnapshot),
    Failed(String),
}

/// Location resolution service
#[derive(Clone)]
pub struct LocationService {
    provider: Arc<dyn PositionProvider>,
    geocoder: GeocodeService,
    config: LocationConfig,
    state: Arc<RwLock<ResolverState>>,
    permission: Arc<RwLock<Option<PermissionStatus>>>,
    /// Bumped on every refresh; a completed resolution is applied only
    /// if its generation is still current, so stale results from an
    /// overlapping refresh are dropped.
    generation: Arc<AtomicU64>,
}

impl LocationService {
    /// Create a new LocationService instance
    pub fn new(
        config: LocationConfig,
        provider: Arc<dyn PositionProvider>,
        geocoder: GeocodeService,
    ) -> Self {
        Self {
            provider,
            geocoder,
            config,
            state: Arc::new(RwLock::new(ResolverState::Uninitialized)),
            permission: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current resolver state
    pub async fn state(&self) -> ResolverState {
        self.state.read().await.clone()
    }

    /// Short place label for the header, with the documented fallbacks
    pub async fn display_location(&self) -> String {
        match &*self.state.read().await {
            ResolverState::Uninitialized | ResolverState::Fetching => FETCHING_LABEL.to_string(),
            ResolverState::PermissionDenied => PERMISSION_DENIED_LABEL.to_string(),
            ResolverState::Failed(_) => UNAVAILABLE_LABEL.to_string(),
            ResolverState::Resolved(snapshot) => snapshot.display_location.clone(),
        }
    }

    /// Longer place label, available only once resolved
    pub async fn full_location(&self) -> Option<String> {
        match &*self.state.read().await {
            ResolverState::Resolved(snapshot) => Some(snapshot.full_location.clone()),
            _ => None,
        }
    }

    /// Human-readable failure reason, if any
    pub async fn error(&self) -> Option<String> {
        match &*self.state.read().await {
            ResolverState::PermissionDenied => Some("Location permission denied".to_string()),
            ResolverState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// District string for scoping news queries. `None` in every
    /// non-resolved state, so callers naturally fall back to an
    /// unfiltered feed.
    pub async fn district_filter(&self) -> Option<String> {
        match &*self.state.read().await {
            ResolverState::Resolved(snapshot)
                if !snapshot.full_location.is_empty()
                    && snapshot.full_location != FETCHING_LABEL
                    && snapshot.full_location != PERMISSION_DENIED_LABEL =>
            {
                Some(snapshot.full_location.clone())
            }
            _ => None,
        }
    }

    /// Run (or re-run) the permission + fetch + geocode sequence.
    /// Idempotent and safe to call repeatedly, e.g. from pull-to-refresh.
    pub async fn refresh(&self) -> ResolverState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Re-request permission unless it is already granted
        let permission = {
            let cached = *self.permission.read().await;
            match cached {
                Some(PermissionStatus::Granted) => PermissionStatus::Granted,
                _ => {
                    let status = self.provider.request_permission().await;
                    *self.permission.write().await = Some(status);
                    status
                }
            }
        };

        if permission == PermissionStatus::Denied {
            log_location_event("permission_denied", None);
            self.apply_if_current(generation, ResolverState::PermissionDenied)
                .await;
            return self.state().await;
        }

        self.apply_if_current(generation, ResolverState::Fetching).await;

        let options = PositionOptions {
            timeout: Duration::from_secs(self.config.fetch_timeout_seconds),
            maximum_age: Duration::from_secs(self.config.maximum_age_seconds),
        };

        let position = tokio::time::timeout(
            options.timeout,
            self.provider.current_position(&options),
        )
        .await;

        let coordinates = match position {
            Ok(Ok(coordinates)) => coordinates,
            Ok(Err(e)) => {
                log_location_event("fetch_failed", Some(&e.to_string()));
                self.apply_if_current(generation, ResolverState::Failed(e.to_string()))
                    .await;
                return self.state().await;
            }
            Err(_) => {
                log_location_event("fetch_failed", Some("position fetch timed out"));
                self.apply_if_current(
                    generation,
                    ResolverState::Failed("Position fetch timed out".to_string()),
                )
                .await;
                return self.state().await;
            }
        };

        let snapshot = match self.geocoder.reverse(coordinates).await {
            Ok(labels) => {
                debug!(
                    display = %labels.display_location,
                    full = %labels.full_location,
                    "Reverse geocoding succeeded"
                );
                LocationSnapshot {
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                    display_location: labels.display_location,
                    full_location: labels.full_location,
                }
            }
            Err(e) => {
                // Geocode failure is not a resolution failure: fall back
                // to showing the raw coordinates.
                warn!(error = %e, "Reverse geocoding failed, using raw coordinates");
                log_location_event("geocode_failed", Some(&e.to_string()));
                LocationSnapshot::from_raw_coordinates(coordinates)
            }
        };

        log_location_event("resolved", Some(&snapshot.full_location));
        self.apply_if_current(generation, ResolverState::Resolved(snapshot))
            .await;
        self.state().await
    }

    async fn apply_if_current(&self, generation: u64, new_state: ResolverState) {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Dropping stale location resolution result");
            return;
        }
        *self.state.write().await = new_state;
    }
}

impl std::fmt::Debug for LocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
