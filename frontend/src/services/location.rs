//! Thin wrappers over `window.location`.

use gloo::utils::window;
use web_sys::UrlSearchParams;

pub fn current_path() -> String {
    window().location().pathname().unwrap_or_default()
}

/// Value of a query-string parameter of the current page
pub fn query_param(name: &str) -> Option<String> {
    let search = window().location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

/// Full page navigation
pub fn navigate(url: &str) {
    if let Err(err) = window().location().set_href(url) {
        gloo::console::error!("Navigation failed:", err);
    }
}
