//! Thin wrappers over `window` for the few things the app needs from the page.
//!
//! Off the browser these are inert: no query string, no origin, confirmations
//! are declined and navigation only logs.

#[cfg(target_arch = "wasm32")]
mod imp {
    pub fn location_search() -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    pub fn pathname() -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    pub fn origin() -> String {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }

    pub fn redirect(url: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window, cannot open {}", url);
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            tracing::error!("redirect to {} failed: {:?}", url, e);
        }
    }

    pub fn confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    /// Swap the address bar to `url` without reloading or adding history.
    pub fn replace_url(url: &str) {
        let history = web_sys::window().and_then(|w| w.history().ok());
        match history {
            Some(history) => {
                if let Err(e) =
                    history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
                {
                    tracing::warn!("could not rewrite url: {:?}", e);
                }
            }
            None => tracing::warn!("history unavailable, url left as is"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub fn location_search() -> String {
        String::new()
    }

    pub fn pathname() -> String {
        "/".to_string()
    }

    pub fn origin() -> String {
        String::new()
    }

    pub fn redirect(url: &str) {
        tracing::info!("redirect requested to {}", url);
    }

    pub fn confirm(message: &str) -> bool {
        tracing::debug!("confirmation declined off-browser: {}", message);
        false
    }

    pub fn replace_url(url: &str) {
        tracing::debug!("url rewrite skipped: {}", url);
    }
}

pub use imp::*;

/// `confirm` as a [`crate::keys::Confirm`] implementor.
pub struct WindowConfirm;

impl crate::keys::Confirm for WindowConfirm {
    fn confirm(&self, message: &str) -> bool {
        confirm(message)
    }
}
