use gloo::timers::callback::Timeout;
use shared::session::{is_supported_provider, oauth_state_matches, post_login_redirect};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::location::{navigate, query_param};
use crate::services::logging::Logger;
use crate::services::session_store::SessionStore;

#[derive(Debug, Clone, PartialEq)]
pub enum OAuthStatus {
    Authenticating,
    Verifying,
    Redirecting,
    Error { message: String },
}

impl OAuthStatus {
    fn title(&self) -> &'static str {
        match self {
            OAuthStatus::Authenticating => "Einen Moment...",
            OAuthStatus::Verifying => "Fast geschafft",
            OAuthStatus::Redirecting => "Alles bereit!",
            OAuthStatus::Error { .. } => "Das hat nicht geklappt",
        }
    }

    fn subtitle(&self) -> &str {
        match self {
            OAuthStatus::Authenticating => "Wir verbinden dich sicher.",
            OAuthStatus::Verifying => "Wir prüfen deine Daten.",
            OAuthStatus::Redirecting => "Du wirst gleich weitergeleitet.",
            OAuthStatus::Error { message } => message,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct OAuthCallbackProps {
    pub provider: String,
    pub api_client: ApiClient,
}

#[function_component(OAuthCallback)]
pub fn oauth_callback(props: &OAuthCallbackProps) -> Html {
    let status = use_state(|| OAuthStatus::Authenticating);

    {
        let status = status.clone();
        let provider = props.provider.clone();
        let api_client = props.api_client.clone();

        use_effect_with((), move |_| {
            let fail = {
                let status = status.clone();
                move |message: String| status.set(OAuthStatus::Error { message })
            };

            let state = query_param("state");
            let expected = SessionStore::take_oauth_state();

            if let Some(error) = query_param("error") {
                Logger::warn_with_component("OAuthCallback", &format!("{} returned error: {}", provider, error));
                fail(query_param("error_description")
                    .unwrap_or_else(|| "Authentifizierung fehlgeschlagen".to_string()));
            } else if !is_supported_provider(&provider) {
                fail(format!("Anmeldung über {} wird nicht unterstützt.", provider));
            } else if !oauth_state_matches(expected.as_deref(), state.as_deref()) {
                Logger::warn_with_component("OAuthCallback", &format!("{} callback with unexpected state", provider));
                fail("Die Anmeldung konnte nicht bestätigt werden. Bitte versuche es erneut.".to_string());
            } else if let Some(code) = query_param("code") {
                spawn_local(async move {
                    status.set(OAuthStatus::Verifying);
                    match api_client.exchange_oauth_code(&provider, &code, state.as_deref()).await {
                        Ok(auth) => {
                            if let Some(access_token) = auth.access_token.as_deref() {
                                SessionStore::store_tokens(access_token, auth.refresh_token.as_deref());
                            }
                            if let Some(user) = &auth.user {
                                SessionStore::set_user(user);
                            }
                            Logger::info_with_component("OAuthCallback", &format!("{} login complete", provider));

                            status.set(OAuthStatus::Redirecting);
                            let target = post_login_redirect(
                                SessionStore::take_redirect_after_login(),
                                state.as_deref(),
                            );
                            Timeout::new(400, move || navigate(&target)).forget();
                        }
                        Err(e) => {
                            Logger::error_with_component("OAuthCallback", &format!("Code exchange failed: {}", e));
                            fail(e.user_message());
                        }
                    }
                });
            } else {
                fail("Kein Autorisierungscode erhalten".to_string());
            }
            || ()
        });
    }

    let is_error = matches!(*status, OAuthStatus::Error { .. });

    html! {
        <div class="oauth-callback">
            <div class="oauth-card">
                {if is_error {
                    html! { <div class="oauth-icon error" aria-label="Fehler">{"✕"}</div> }
                } else {
                    html! { <div class="spinner" aria-label="Wird verarbeitet" /> }
                }}
                <h2 class="oauth-title">{status.title()}</h2>
                <p class="oauth-subtitle">{status.subtitle().to_string()}</p>
                {if is_error {
                    html! { <a class="button button-primary" href="/anmelden">{"Zurück zur Anmeldung"}</a> }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
