//! # Domain Layer
//!
//! The relay owns no booking data. Its only domain concern is brokering the
//! OAuth handshake between the browser and the booking backend, and turning
//! the backend's tokens into session cookies.

pub mod oauth_relay;

pub use oauth_relay::{session_cookies, OAuthRelay};
