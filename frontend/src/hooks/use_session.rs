use shared::User;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::logging::Logger;
use crate::services::session_store::SessionStore;

#[derive(Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub checking: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct UseSessionResult {
    pub state: SessionState,
    pub actions: UseSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSessionActions {
    pub logout: Callback<()>,
}

/// Cached user, revalidated against `/auth/me` when a token is present
#[hook]
pub fn use_session(api_client: &ApiClient) -> UseSessionResult {
    let user = use_state(SessionStore::user);
    let checking = use_state(|| false);

    {
        let user = user.clone();
        let checking = checking.clone();
        use_effect_with(api_client.clone(), move |api_client| {
            if SessionStore::access_token().is_some() {
                let api_client = api_client.clone();
                spawn_local(async move {
                    checking.set(true);
                    match api_client.get_current_user().await {
                        Ok(current) => {
                            SessionStore::set_user(&current);
                            user.set(Some(current));
                        }
                        Err(ApiError::Unauthorized) => {
                            SessionStore::clear();
                            user.set(None);
                        }
                        Err(e) => Logger::warn_with_component(
                            "use_session",
                            &format!("Could not refresh user: {}", e),
                        ),
                    }
                    checking.set(false);
                });
            } else if user.is_some() {
                // Cached user without a token is stale
                SessionStore::clear();
                user.set(None);
            }
            || ()
        });
    }

    let logout = {
        let user = user.clone();
        use_callback(api_client.clone(), move |_: (), api_client| {
            let api_client = api_client.clone();
            let user = user.clone();
            spawn_local(async move {
                api_client.logout().await;
                Logger::info_with_component("use_session", "Logged out");
                user.set(None);
            });
        })
    };

    UseSessionResult {
        state: SessionState {
            user: (*user).clone(),
            checking: *checking,
        },
        actions: UseSessionActions { logout },
    }
}
