use axum::{
    extract::{Path, Query, State},
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use shared::session::is_supported_provider;
use shared::OAuthCallbackRequest;
use tracing::{error, info, warn};

use crate::backend::domain::session_cookies;
use crate::backend::AppState;
use crate::error::RelayError;

#[derive(Debug, Deserialize)]
pub struct OAuthUrlQuery {
    pub state: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:provider/url", get(get_oauth_url))
        .route("/:provider/callback", post(oauth_callback))
}

fn check_provider(provider: &str) -> Result<(), RelayError> {
    if is_supported_provider(provider) {
        Ok(())
    } else {
        warn!("Rejected unknown OAuth provider '{}'", provider);
        Err(RelayError::UnknownProvider(provider.to_string()))
    }
}

fn log_failure(context: &str, provider: &str, err: &RelayError) {
    match err {
        RelayError::Upstream(source) => error!("{} for {}: {}", context, provider, source),
        other => warn!("{} for {}: {}", context, provider, other),
    }
}

async fn get_oauth_url(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<OAuthUrlQuery>,
) -> Result<Json<Value>, RelayError> {
    info!("GET /api/oauth/{}/url", provider);
    check_provider(&provider)?;

    state
        .relay
        .authorization_url(&provider, query.state.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            log_failure("OAuth URL lookup failed", &provider, &e);
            e
        })
}

async fn oauth_callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(callback): Json<OAuthCallbackRequest>,
) -> Result<Response, RelayError> {
    info!("POST /api/oauth/{}/callback", provider);
    check_provider(&provider)?;

    if callback.code.trim().is_empty() {
        warn!("OAuth callback for {} without a code", provider);
        return Err(RelayError::MissingCode);
    }

    let auth = state
        .relay
        .exchange_code(&provider, &callback)
        .await
        .map_err(|e| {
            log_failure("OAuth code exchange failed", &provider, &e);
            e
        })?;

    let cookies = session_cookies(&auth, state.config.production);
    let mut response = Json(auth).into_response();
    for cookie in cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Dropping unencodable session cookie: {}", e),
        }
    }

    Ok(response)
}
