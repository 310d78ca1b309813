//! # Backend Module
//!
//! Server-side half of the studio booking site.
//!
//! The booking backend (treatments, availability, appointments, loyalty and
//! auth) is an external service. This module only:
//! - **Domain**: brokers the OAuth code exchange and builds session cookies
//! - **IO**: exposes the relay, log sink and public config under `/api`
//!
//! ## Architecture
//!
//! ```text
//! Browser (Yew frontend)
//!     ↓
//! IO Layer (REST handlers under /api, static files for everything else)
//!     ↓
//! Domain Layer (OAuth relay)
//!     ↓
//! Booking backend (HTTP)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Build the shared application state from [`ServerConfig`]
//! - Set up the router with CORS for the dev frontend origin
//! - Serve the compiled frontend with an `index.html` fallback for client routes

pub mod domain;
pub mod io;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use domain::OAuthRelay;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub relay: OAuthRelay,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        info!("Relaying OAuth to {}", config.backend_url);
        let relay = OAuthRelay::new(&config.backend_url).context("Failed to build HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            relay,
        })
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let dist = app_state.config.frontend_dist.clone();
    let static_files = ServeDir::new(&dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .nest("/api", io::rest::router())
        .fallback_service(static_files)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
