//! # REST API Interface Layer
//!
//! Endpoints mounted under `/api`:
//! - `oauth_apis`: OAuth URL lookup and code exchange relayed to the backend
//! - `logging_apis`: log lines posted by the browser
//! - `config_apis`: public runtime config for the frontend
//!
//! Each module exposes a `router()` that is merged in [`router`]. Handlers
//! translate domain failures into `{ "error": ... }` JSON bodies.

use axum::Router;

use crate::backend::AppState;

pub mod config_apis;
pub mod logging_apis;
pub mod oauth_apis;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/oauth", oauth_apis::router())
        .merge(logging_apis::router())
        .merge(config_apis::router())
}
