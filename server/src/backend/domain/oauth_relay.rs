//! Forwards OAuth URL lookups and code exchanges to the booking backend.
//!
//! The browser never talks to the backend's OAuth endpoints directly: the
//! relay keeps the backend URL private and turns a successful exchange into
//! `HttpOnly` session cookies.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;
use shared::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use shared::OAuthCallbackRequest;
use tracing::{info, warn};

use crate::error::RelayError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 24 hours
pub const ACCESS_COOKIE_MAX_AGE: u64 = 60 * 60 * 24;
/// 7 days
pub const REFRESH_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 7;

const URL_FAILED: &str = "Failed to get OAuth URL";
const CALLBACK_FAILED: &str = "OAuth callback failed";

#[derive(Clone)]
pub struct OAuthRelay {
    client: reqwest::Client,
    backend_url: String,
}

impl OAuthRelay {
    pub fn new(backend_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, provider: &str, action: &str) -> String {
        format!("{}/api/oauth/{}/{}", self.backend_url, provider, action)
    }

    /// Ask the backend for the provider's authorization URL; the backend's
    /// JSON is passed through untouched
    pub async fn authorization_url(
        &self,
        provider: &str,
        state: Option<&str>,
    ) -> Result<Value, RelayError> {
        let mut request = self.client.get(self.endpoint(provider, "url"));
        if let Some(state) = state {
            request = request.query(&[("state", state)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Backend refused OAuth URL for {}: {}", provider, status);
            return Err(RelayError::Backend {
                status: relay_status(status.as_u16()),
                message: URL_FAILED.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }

    /// Exchange an authorization code; returns the backend's `data` payload
    pub async fn exchange_code(
        &self,
        provider: &str,
        callback: &OAuthCallbackRequest,
    ) -> Result<Value, RelayError> {
        let response = self
            .client
            .post(self.endpoint(provider, "callback"))
            .json(callback)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The error body is optional; an unreadable one still maps to the backend status
            let body = response.json::<Value>().await.unwrap_or(Value::Null);
            let message = string_field(&body, "message").unwrap_or(CALLBACK_FAILED).to_string();
            warn!("OAuth callback for {} failed with {}: {}", provider, status, message);
            return Err(RelayError::Backend {
                status: relay_status(status.as_u16()),
                message,
            });
        }

        let body = response.json::<Value>().await?;
        if !body.get("success").and_then(Value::as_bool).unwrap_or(false) {
            let message = string_field(&body, "error")
                .or_else(|| string_field(&body, "message"))
                .unwrap_or(CALLBACK_FAILED)
                .to_string();
            warn!("Backend rejected {} code: {}", provider, message);
            return Err(RelayError::Rejected(message));
        }

        info!("OAuth code exchange for {} succeeded", provider);
        Ok(body.get("data").cloned().unwrap_or(Value::Null))
    }
}

fn string_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn relay_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// `Set-Cookie` values for a successful exchange. Nothing is set unless the
/// auth payload reports success; each token then gets its own cookie when
/// the backend issued it.
pub fn session_cookies(auth: &Value, secure: bool) -> Vec<String> {
    if !auth.get("success").and_then(Value::as_bool).unwrap_or(false) {
        return Vec::new();
    }

    [
        (ACCESS_TOKEN_KEY, ACCESS_COOKIE_MAX_AGE),
        (REFRESH_TOKEN_KEY, REFRESH_COOKIE_MAX_AGE),
    ]
    .into_iter()
    .filter_map(|(name, max_age)| {
        string_field(auth, name).map(|token| cookie(name, token, max_age, secure))
    })
    .collect()
}

fn cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        name, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cookies_for_successful_login() {
        let auth = json!({
            "success": true,
            "accessToken": "acc",
            "refreshToken": "ref",
        });

        let cookies = session_cookies(&auth, false);
        assert_eq!(
            cookies,
            vec![
                "accessToken=acc; Max-Age=86400; Path=/; HttpOnly; SameSite=Lax".to_string(),
                "refreshToken=ref; Max-Age=604800; Path=/; HttpOnly; SameSite=Lax".to_string(),
            ]
        );
    }

    #[test]
    fn test_secure_flag_in_production() {
        let auth = json!({ "success": true, "accessToken": "acc" });
        let cookies = session_cookies(&auth, true);
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].ends_with("; Secure"));
    }

    #[test]
    fn test_no_cookies_without_success_or_token() {
        assert!(session_cookies(&json!({ "success": false, "accessToken": "acc" }), false).is_empty());
        assert!(session_cookies(&json!({ "success": true }), false).is_empty());
        assert!(session_cookies(&json!({ "success": true, "accessToken": "" }), false).is_empty());
        assert!(session_cookies(&Value::Null, false).is_empty());
    }

    #[test]
    fn test_refresh_cookie_without_access_token() {
        let auth = json!({ "success": true, "refreshToken": "ref" });
        assert_eq!(
            session_cookies(&auth, false),
            vec!["refreshToken=ref; Max-Age=604800; Path=/; HttpOnly; SameSite=Lax".to_string()]
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let relay = OAuthRelay::new("http://localhost:5000/").unwrap();
        assert_eq!(
            relay.endpoint("google", "callback"),
            "http://localhost:5000/api/oauth/google/callback"
        );
    }
}
