//! Varta client
//!
//! Headless smoke client: loads configuration, hydrates the session,
//! resolves the reader's location and prints a digest of the published
//! feed. Useful for exercising the SDK against a real backend.

use anyhow::Context;
use tracing::{info, warn};

use varta_client::{
    config::Settings,
    api::AuthEvent,
    services::ResolverState,
    state::AppContext,
    utils::{helpers::truncate_text, logging},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging
    logging::init_logging(&settings.logging).context("failed to initialize logging")?;

    info!("Starting {}...", varta_client::info());

    // Build the application context; the session is hydrated before
    // anything consumes it.
    let context = AppContext::initialize(settings)
        .await
        .context("failed to initialize application context")?;

    let snapshot = context.session.snapshot().await;
    match &snapshot.user {
        Some(user) => info!(user_id = %user.id, role = %user.role, "Session restored"),
        None => info!("No persisted session, browsing as guest"),
    }

    // A 401 anywhere drops the session; the data layer has already
    // cleared the token by the time this fires.
    let mut auth_events = context.api.subscribe_auth_events();
    let session = context.session.clone();
    tokio::spawn(async move {
        while let Ok(event) = auth_events.recv().await {
            if event == AuthEvent::Unauthorized {
                warn!("Session expired, logging out");
                session.logout().await;
            }
        }
    });

    // Resolve the reader's location; every failure mode degrades to an
    // unfiltered feed.
    let location = &context.services.location_service;
    match location.refresh().await {
        ResolverState::Resolved(snapshot) => {
            info!(location = %snapshot.full_location, "Location resolved");
        }
        other => {
            info!(state = ?other, display = %location.display_location().await, "Browsing without a district filter");
        }
    }

    // Fetch the first page of the published feed
    let filters = context.feed_filters().await;
    let feed = context
        .services
        .news_service
        .published_feed(1, 10, &filters)
        .await;

    if feed.error {
        warn!(message = %feed.message, "Feed fetch failed");
        return Ok(());
    }

    let page = feed.data.unwrap_or_default();
    info!(count = page.articles.len(), "Feed fetched");
    for article in &page.articles {
        println!(
            "[{}] {} — {}",
            article.status,
            truncate_text(&article.headline, 60),
            article.category
        );
    }

    Ok(())
}
