use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the relay endpoints as `{ "error": ... }` bodies
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Unknown OAuth provider '{0}'")]
    UnknownProvider(String),

    #[error("Authorization code is required")]
    MissingCode,

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    /// Backend answered 2xx but with `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Internal server error")]
    Upstream(#[from] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            RelayError::MissingCode | RelayError::Rejected(_) => StatusCode::BAD_REQUEST,
            RelayError::Backend { status, .. } => *status,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(RelayError::UnknownProvider("myspace".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(RelayError::MissingCode.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::Rejected("nope".into()).status(), StatusCode::BAD_REQUEST);
        let backend = RelayError::Backend {
            status: StatusCode::BAD_GATEWAY,
            message: "Failed to get OAuth URL".into(),
        };
        assert_eq!(backend.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(backend.to_string(), "Failed to get OAuth URL");
    }
}
