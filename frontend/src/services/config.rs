use gloo::net::http::Request;
use shared::PublicConfig;

use super::api::DEFAULT_API_URL;

/// Configuration compiled into the bundle, used until `/api/config` answers
pub fn fallback_config() -> PublicConfig {
    PublicConfig {
        under_construction: false,
        api_base_url: option_env!("STUDIO_API_URL")
            .unwrap_or(DEFAULT_API_URL)
            .to_string(),
    }
}

/// Runtime configuration served by the relay server
pub async fn fetch_public_config() -> PublicConfig {
    let response = match Request::get("/api/config").send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            gloo::console::warn!("Config endpoint returned", response.status());
            return fallback_config();
        }
        Err(err) => {
            gloo::console::warn!("Config endpoint unreachable:", err.to_string());
            return fallback_config();
        }
    };

    match response.json::<PublicConfig>().await {
        Ok(config) => config,
        Err(err) => {
            gloo::console::error!("Failed to parse config:", err.to_string());
            fallback_config()
        }
    }
}
