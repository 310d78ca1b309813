use gloo::storage::{LocalStorage, Storage};
use shared::session::{
    is_local_path, usable_token, ACCESS_TOKEN_KEY, LOGIN_PATH, LOGIN_REDIRECT, OAUTH_STATE_KEY,
    REDIRECT_AFTER_LOGIN_KEY, REFRESH_TOKEN_KEY, USER_KEY,
};
use shared::User;

use super::location::{current_path, navigate};

/// Credentials persisted in `localStorage`
pub struct SessionStore;

impl SessionStore {
    pub fn access_token() -> Option<String> {
        usable_token(LocalStorage::get(ACCESS_TOKEN_KEY).ok())
    }

    pub fn refresh_token() -> Option<String> {
        usable_token(LocalStorage::get(REFRESH_TOKEN_KEY).ok())
    }

    pub fn store_tokens(access_token: &str, refresh_token: Option<&str>) {
        if let Err(err) = LocalStorage::set(ACCESS_TOKEN_KEY, access_token) {
            gloo::console::error!("Failed to store access token:", err.to_string());
        }
        if let Some(refresh_token) = refresh_token {
            if let Err(err) = LocalStorage::set(REFRESH_TOKEN_KEY, refresh_token) {
                gloo::console::error!("Failed to store refresh token:", err.to_string());
            }
        }
    }

    pub fn user() -> Option<User> {
        LocalStorage::get(USER_KEY).ok()
    }

    pub fn set_user(user: &User) {
        if let Err(err) = LocalStorage::set(USER_KEY, user) {
            gloo::console::error!("Failed to cache user:", err.to_string());
        }
    }

    pub fn clear() {
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        LocalStorage::delete(REFRESH_TOKEN_KEY);
        LocalStorage::delete(USER_KEY);
    }

    /// Page to return to once the login completes; non-local targets are ignored
    pub fn remember_redirect(path: &str) {
        if !is_local_path(path) {
            return;
        }
        if let Err(err) = LocalStorage::set(REDIRECT_AFTER_LOGIN_KEY, path) {
            gloo::console::error!("Failed to store redirect:", err.to_string());
        }
    }

    pub fn set_oauth_state(state: &str) {
        if let Err(err) = LocalStorage::set(OAUTH_STATE_KEY, state) {
            gloo::console::error!("Failed to store OAuth state:", err.to_string());
        }
    }

    /// Read and forget the `state` of the login in flight
    pub fn take_oauth_state() -> Option<String> {
        let state = LocalStorage::get::<String>(OAUTH_STATE_KEY).ok();
        LocalStorage::delete(OAUTH_STATE_KEY);
        state
    }

    /// Read and forget the page stored before a forced login
    pub fn take_redirect_after_login() -> Option<String> {
        let target = LocalStorage::get::<String>(REDIRECT_AFTER_LOGIN_KEY).ok();
        LocalStorage::delete(REDIRECT_AFTER_LOGIN_KEY);
        target
    }

    /// Drop the session and send the user to the login page, remembering where they were
    pub fn expire_session() {
        let path = current_path();
        Self::clear();
        if path.starts_with(LOGIN_PATH) {
            return;
        }
        Self::remember_redirect(&path);
        navigate(LOGIN_REDIRECT);
    }
}
