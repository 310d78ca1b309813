//! Session policy for the browser client.
//!
//! Storage itself lives in the frontend; this module only decides what to do
//! with stored credentials when a request fails, and how to read the token out
//! of the backend's refresh response.

use serde_json::Value;

/// `localStorage` key for the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// `localStorage` key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// `localStorage` key for the cached user
pub const USER_KEY: &str = "user";
/// `localStorage` key for the page to return to after login
pub const REDIRECT_AFTER_LOGIN_KEY: &str = "redirectAfterLogin";

/// `localStorage` key for the `state` sent with the last OAuth login
pub const OAUTH_STATE_KEY: &str = "oauthState";

/// Login page path
pub const LOGIN_PATH: &str = "/anmelden";
/// Customer area with appointments and the stamp card
pub const ACCOUNT_PATH: &str = "/mein-bereich";
/// Where the browser goes once the session is gone
pub const LOGIN_REDIRECT: &str = "/anmelden?session=expired";

/// Upper bound for the token refresh call, in milliseconds
pub const REFRESH_TIMEOUT_MS: u32 = 10_000;

/// Providers the OAuth relay accepts
pub const OAUTH_PROVIDERS: [&str; 4] = ["google", "instagram", "facebook", "apple"];

const UNAUTHORIZED: u16 = 401;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Leave the session alone and surface the error
    Keep,
    /// Refresh the access token, then retry the request once
    TryRefresh,
    /// Drop all stored credentials and send the user to the login page
    ClearAndRedirect,
}

/// Stored tokens come back as strings; treat the usual junk values as missing
pub fn is_valid_token(token: Option<&str>) -> bool {
    matches!(token, Some(t) if !t.is_empty() && t != "null" && t != "undefined")
}

/// Filter a stored token through [`is_valid_token`]
pub fn usable_token(token: Option<String>) -> Option<String> {
    token.filter(|t| is_valid_token(Some(t.as_str())))
}

/// Auth endpoints report their own failures and never trigger a refresh
pub fn is_auth_endpoint(url: &str) -> bool {
    url.contains("/auth/") || url.contains("/oauth/")
}

/// Endpoints with their own auth rules; a 401 there is reported, not refreshed
fn is_refresh_exempt(url: &str) -> bool {
    is_auth_endpoint(url) || url.contains("/treatments/all") || url.contains("/admin/treatments")
}

pub fn is_supported_provider(provider: &str) -> bool {
    OAUTH_PROVIDERS.contains(&provider)
}

/// Decide what a failed API call means for the session
pub fn on_api_failure(status: u16, url: &str, refresh_token: Option<&str>) -> SessionAction {
    if status != UNAUTHORIZED || is_refresh_exempt(url) {
        return SessionAction::Keep;
    }
    if is_valid_token(refresh_token) {
        SessionAction::TryRefresh
    } else {
        SessionAction::ClearAndRedirect
    }
}

/// Decide what a failed refresh attempt means. `None` is a network failure.
pub fn on_refresh_failure(status: Option<u16>) -> SessionAction {
    match status {
        Some(UNAUTHORIZED) => SessionAction::ClearAndRedirect,
        _ => SessionAction::Keep,
    }
}

/// Pull the new access token out of a refresh response.
///
/// The backend has answered with `accessToken` and with `token`, both at the
/// top level and inside a `data` object.
pub fn extract_refreshed_token(body: &Value) -> Option<String> {
    let pick = |value: &Value| {
        ["accessToken", "token"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .filter(|token| is_valid_token(Some(*token)))
            .map(str::to_string)
    };

    body.get("data").and_then(pick).or_else(|| pick(body))
}

/// Optional rotated refresh token from the same response
pub fn extract_refreshed_refresh_token(body: &Value) -> Option<String> {
    let pick = |value: &Value| {
        value
            .get("refreshToken")
            .and_then(Value::as_str)
            .filter(|token| is_valid_token(Some(*token)))
            .map(str::to_string)
    };

    body.get("data").and_then(pick).or_else(|| pick(body))
}

/// Random value for the OAuth `state` parameter
pub fn new_oauth_state() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// A callback is accepted when no login was started from this browser or when
/// the returned `state` matches the one that was sent
pub fn oauth_state_matches(expected: Option<&str>, received: Option<&str>) -> bool {
    match expected {
        Some(expected) => received == Some(expected),
        None => true,
    }
}

/// Same-origin absolute path. Protocol-relative (`//host`) and backslash
/// (`/\host`) forms leave the site in browsers and are rejected.
pub fn is_local_path(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}

/// Page to open after a completed OAuth login. A stored redirect wins; an
/// account-linking flow (`state=link`) returns to the account settings.
pub fn post_login_redirect(stored: Option<String>, state: Option<&str>) -> String {
    match stored.filter(|target| is_local_path(target)) {
        Some(target) => target,
        None if state == Some("link") => "/mein-bereich/einstellungen/account".to_string(),
        None => ACCOUNT_PATH.to_string(),
    }
}

/// Provider name from a `/auth/{provider}/callback` path
pub fn provider_from_callback_path(path: &str) -> Option<&str> {
    let rest = path.trim_end_matches('/').strip_prefix("/auth/")?;
    let provider = rest.strip_suffix("/callback")?;
    (!provider.is_empty() && !provider.contains('/')).then_some(provider)
}
