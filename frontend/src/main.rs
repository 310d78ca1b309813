use shared::session::{provider_from_callback_path, ACCOUNT_PATH, LOGIN_PATH};
use shared::PublicConfig;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::account_page::AccountPage;
use components::booking_page::BookingPage;
use components::construction_banner::ConstructionBanner;
use components::header::Header;
use components::login_page::LoginPage;
use components::oauth_callback::OAuthCallback;
use hooks::use_session::use_session;
use services::api::ApiClient;
use services::config::fetch_public_config;
use services::location::current_path;
use services::logging::Logger;

#[derive(Debug, Clone, PartialEq)]
enum Route {
    OAuthCallback { provider: String },
    Login,
    Account,
    Booking,
}

impl Route {
    fn from_path(path: &str) -> Self {
        if let Some(provider) = provider_from_callback_path(path) {
            return Route::OAuthCallback {
                provider: provider.to_string(),
            };
        }
        match path.trim_end_matches('/') {
            LOGIN_PATH => Route::Login,
            ACCOUNT_PATH => Route::Account,
            _ => Route::Booking,
        }
    }
}

/// Client for the loaded runtime config; none until `/api/config` has answered
fn api_client_for(config: Option<&PublicConfig>) -> Option<ApiClient> {
    config.map(|config| ApiClient::with_base_url(&config.api_base_url))
}

#[derive(Properties, PartialEq)]
struct ShellProps {
    api_client: ApiClient,
    route: Route,
    under_construction: bool,
}

#[function_component(Shell)]
fn shell(props: &ShellProps) -> Html {
    let session = use_session(&props.api_client);

    let page = match &props.route {
        Route::OAuthCallback { provider } => html! {
            <OAuthCallback provider={provider.clone()} api_client={props.api_client.clone()} />
        },
        Route::Login => html! {
            <LoginPage api_client={props.api_client.clone()} />
        },
        Route::Account => html! {
            <AccountPage api_client={props.api_client.clone()} user={session.state.user.clone()} />
        },
        Route::Booking => html! {
            <BookingPage api_client={props.api_client.clone()} />
        },
    };

    html! {
        <>
            <ConstructionBanner visible={props.under_construction} />
            <Header
                user={session.state.user.clone()}
                checking_session={session.state.checking}
                on_logout={session.actions.logout.clone()}
            />
            {page}
        </>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_state(|| Option::<PublicConfig>::None);
    let route = use_memo((), |_| Route::from_path(&current_path()));

    {
        let config = config.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let loaded = fetch_public_config().await;
                Logger::debug_with_component(
                    "App",
                    &format!("Using backend {}", loaded.api_base_url),
                );
                config.set(Some(loaded));
            });
            || ()
        });
    }

    let active = (*config).as_ref();
    let Some(api_client) = api_client_for(active) else {
        return html! {
            <div class="app-loading">
                <div class="spinner" aria-label="Wird geladen" />
            </div>
        };
    };

    html! {
        <Shell
            api_client={api_client}
            route={(*route).clone()}
            under_construction={active.map_or(false, |c| c.under_construction)}
        />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/anmelden"), Route::Login);
        assert_eq!(Route::from_path("/anmelden/"), Route::Login);
        assert_eq!(Route::from_path("/mein-bereich"), Route::Account);
        assert_eq!(
            Route::from_path("/auth/google/callback"),
            Route::OAuthCallback { provider: "google".to_string() }
        );
        assert_eq!(Route::from_path("/online-booking"), Route::Booking);
        assert_eq!(Route::from_path("/"), Route::Booking);
    }

    #[test]
    fn test_no_client_before_config() {
        assert_eq!(api_client_for(None), None);

        let config = PublicConfig {
            under_construction: false,
            api_base_url: "https://api.lm-beauty.de/api".to_string(),
        };
        let client = api_client_for(Some(&config)).unwrap();
        assert_eq!(client, ApiClient::with_base_url("https://api.lm-beauty.de/api"));
    }
}
