use shared::session::new_oauth_state;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::location::{navigate, query_param};
use crate::services::logging::Logger;
use crate::services::session_store::SessionStore;

const LOGIN_FAILED: &str = "Anmeldung fehlgeschlagen. Bitte versuche es erneut.";

/// Providers offered on the login page, with their button labels
const LOGIN_PROVIDERS: [(&str, &str); 2] = [
    ("google", "Mit Google anmelden"),
    ("instagram", "Mit Instagram anmelden"),
];

/// Message to show on arrival, from the query string of a failed or expired login
fn initial_notice(message: Option<String>, error: Option<String>, session: Option<String>) -> Option<String> {
    message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| error.map(|_| LOGIN_FAILED.to_string()))
        .or_else(|| {
            (session.as_deref() == Some("expired"))
                .then(|| "Deine Sitzung ist abgelaufen. Bitte melde dich erneut an.".to_string())
        })
}

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub api_client: ApiClient,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let notice = use_state(|| {
        initial_notice(query_param("message"), query_param("error"), query_param("session"))
    });
    let loading = use_state(|| None::<&'static str>);

    // `?redirect=/path` lets other pages send the customer back after login
    use_effect_with((), |_| {
        if let Some(target) = query_param("redirect") {
            SessionStore::remember_redirect(&target);
        }
        || ()
    });

    let start_login = {
        let notice = notice.clone();
        let loading = loading.clone();
        let api_client = props.api_client.clone();
        move |provider: &'static str| {
            let notice = notice.clone();
            let loading = loading.clone();
            let api_client = api_client.clone();
            Callback::from(move |_: MouseEvent| {
                if loading.is_some() {
                    return;
                }
                loading.set(Some(provider));
                notice.set(None);

                let state = new_oauth_state();
                SessionStore::set_oauth_state(&state);

                let notice = notice.clone();
                let loading = loading.clone();
                let api_client = api_client.clone();
                spawn_local(async move {
                    match api_client.get_oauth_url(provider, &state).await {
                        Ok(url) if !url.is_empty() => {
                            Logger::info_with_component("LoginPage", &format!("Redirecting to {} login", provider));
                            navigate(&url);
                        }
                        Ok(_) => {
                            Logger::error_with_component("LoginPage", &format!("Empty {} login URL", provider));
                            notice.set(Some(LOGIN_FAILED.to_string()));
                            loading.set(None);
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "LoginPage",
                                &format!("Could not start {} login: {}", provider, e),
                            );
                            notice.set(Some(LOGIN_FAILED.to_string()));
                            loading.set(None);
                        }
                    }
                });
            })
        }
    };

    html! {
        <main class="login-page">
            <div class="login-card">
                <h1 class="login-title">{"Willkommen zurück"}</h1>
                <p class="login-subtitle">{"Melde dich an für deine Beauty-Termine"}</p>

                {for notice.as_ref().map(|text| html! { <p class="form-error">{text}</p> })}

                <div class="login-options">
                    {for LOGIN_PROVIDERS.iter().map(|&(provider, label)| {
                        let busy = *loading == Some(provider);
                        html! {
                            <button
                                class={classes!("button", "button-primary", "login-button", provider.to_string())}
                                disabled={loading.is_some()}
                                onclick={start_login(provider)}
                            >
                                {if busy { "Anmelden..." } else { label }}
                            </button>
                        }
                    })}
                </div>

                <p class="login-legal">
                    {"Mit der Anmeldung stimmst du unserer "}
                    <a href="/datenschutz">{"Datenschutzerklärung"}</a>
                    {" zu."}
                </p>
            </div>
        </main>
    }
}
