//! credits-server library interface
//!
//! Album credit aggregation over the Genius API with best-effort Instagram
//! contact discovery. Exposes the router and state for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::services::{CatalogApi, CatalogError, GeniusClient, InstagramClient, PacingPolicy, SocialApi};

/// Application state shared across handlers
///
/// Nothing request-derived lives here; every handler call builds its
/// results from scratch.
#[derive(Clone)]
pub struct AppState {
    /// Music catalog (Genius in production)
    pub catalog: Arc<dyn CatalogApi>,
    /// Instagram lookups; `None` when disabled in config
    pub social: Option<Arc<dyn SocialApi>>,
    /// Process-wide pacers for upstream calls
    pub pacing: PacingPolicy,
    /// Whether a usable Genius token was configured at startup
    pub token_configured: bool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        social: Option<Arc<dyn SocialApi>>,
        pacing: PacingPolicy,
        token_configured: bool,
    ) -> Self {
        Self {
            catalog,
            social,
            pacing,
            token_configured,
            startup_time: Utc::now(),
        }
    }

    /// Build production clients from resolved configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, CatalogError> {
        let settings = &config.settings;
        let pacing = PacingPolicy::from_config(&settings.pacing);

        let catalog = GeniusClient::new(
            config.genius_token.as_deref().unwrap_or_default(),
            settings.genius_base_url.clone(),
            settings.request_timeout(),
            Arc::clone(&pacing.search_song),
        )?;

        let social: Option<Arc<dyn SocialApi>> = if settings.instagram.enabled {
            Some(Arc::new(InstagramClient::new(
                settings.instagram.base_url.clone(),
                settings.request_timeout(),
            )))
        } else {
            None
        };

        Ok(Self::new(
            Arc::new(catalog),
            social,
            pacing,
            config.token_configured(),
        ))
    }
}

/// Bind the HTTP listener and log the address actually bound
///
/// A configured port of 0 resolves to the ephemeral port the OS picked.
pub async fn bind_listener(config: &ServiceConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("Listening on http://{}", local_addr);
    tracing::info!("Health check: http://{}/api/health", local_addr);
    Ok(listener)
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::search_routes())
        .merge(api::credits_routes())
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
