//! Static host and OAuth relay for the studio booking frontend.

pub mod backend;
pub mod config;
pub mod error;

pub use backend::{create_router, AppState};
pub use config::ServerConfig;
pub use error::RelayError;
