use axum::{routing::post, Json, Router};
use shared::{LogRequest, LogResponse};
use tracing::{debug, error, info, warn};

use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/logs", post(log_message))
}

/// Re-emit a browser log line through `tracing`
async fn log_message(Json(request): Json<LogRequest>) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!(target: "frontend", "{}", message),
        "warn" => warn!(target: "frontend", "{}", message),
        "error" => error!(target: "frontend", "{}", message),
        _ => info!(target: "frontend", "{}", message),
    }

    Json(LogResponse { success: true })
}
