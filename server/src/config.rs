use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use shared::PublicConfig;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_FRONTEND_DIST: &str = "../frontend/dist";
pub const DEFAULT_PUBLIC_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

/// Runtime settings read from the environment (after `.env` is loaded)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the booking backend, without the `/api` suffix
    pub backend_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_dist: PathBuf,
    /// Adds `Secure` to session cookies
    pub production: bool,
    pub under_construction: bool,
    /// API base URL handed to the browser
    pub public_api_url: String,
    pub cors_origin: HeaderValue,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = read("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDR '{}' is not a socket address", bind_addr))?;

        let cors_origin = read("CORS_ORIGIN", DEFAULT_CORS_ORIGIN);
        let cors_origin = HeaderValue::from_str(&cors_origin)
            .with_context(|| format!("CORS_ORIGIN '{}' is not a valid header value", cors_origin))?;

        Ok(Self {
            backend_url: read("BACKEND_URL", DEFAULT_BACKEND_URL)
                .trim_end_matches('/')
                .to_string(),
            bind_addr,
            frontend_dist: PathBuf::from(read("FRONTEND_DIST", DEFAULT_FRONTEND_DIST)),
            production: read("APP_ENV", "development").eq_ignore_ascii_case("production"),
            under_construction: read("UNDER_CONSTRUCTION", "false") == "true",
            public_api_url: read("PUBLIC_API_URL", DEFAULT_PUBLIC_API_URL),
            cors_origin,
        })
    }

    pub fn public_config(&self) -> PublicConfig {
        PublicConfig {
            under_construction: self.under_construction,
            api_base_url: self.public_api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.frontend_dist, PathBuf::from(DEFAULT_FRONTEND_DIST));
        assert!(!config.production);
        assert!(!config.under_construction);
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BACKEND_URL", "https://api.example.com/"),
            ("APP_ENV", "production"),
            ("UNDER_CONSTRUCTION", "true"),
            ("PUBLIC_API_URL", "https://api.example.com/api"),
        ])
        .unwrap();

        assert_eq!(config.backend_url, "https://api.example.com");
        assert!(config.production);
        assert!(config.under_construction);
        assert_eq!(
            config.public_config(),
            PublicConfig {
                under_construction: true,
                api_base_url: "https://api.example.com/api".to_string(),
            }
        );
    }

    #[test]
    fn test_under_construction_only_for_literal_true() {
        for value in ["1", "yes", "TRUE", "on"] {
            let config = config_from(&[("UNDER_CONSTRUCTION", value)]).unwrap();
            assert!(!config.under_construction, "value {value}");
        }
    }

    #[test]
    fn test_bad_bind_addr() {
        let err = config_from(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));
    }
}
