use axum::{extract::State, routing::get, Json, Router};
use shared::PublicConfig;

use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(get_public_config))
}

async fn get_public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(state.config.public_config())
}
