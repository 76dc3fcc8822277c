//! Copying key material.
//!
//! The async clipboard API is tried first. Where it is missing or refuses
//! (insecure origin, denied permission) the text of the input showing the key
//! is selected instead so the user can copy it by hand.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// The key's input is selected for a manual copy.
    ManualSelect,
    Failed,
}

impl CopyOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            CopyOutcome::Copied => "Copied to clipboard",
            CopyOutcome::ManualSelect => "Key selected. Press Ctrl+C to copy it.",
            CopyOutcome::Failed => "Could not copy the key",
        }
    }
}

/// Copy `text`, falling back to selecting the input with id `input_id`.
pub async fn copy_text(text: &str, input_id: &str) -> CopyOutcome {
    if text.is_empty() {
        return CopyOutcome::Failed;
    }
    match write_clipboard(text).await {
        Ok(()) => CopyOutcome::Copied,
        Err(reason) => {
            tracing::debug!("clipboard write failed ({}), selecting input", reason);
            if select_input(input_id) {
                CopyOutcome::ManualSelect
            } else {
                CopyOutcome::Failed
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn write_clipboard(text: &str) -> Result<(), String> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window().ok_or("no window")?;
    let clipboard: JsValue = window.navigator().clipboard().into();
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard api unavailable".to_string());
    }
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{e:?}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn write_clipboard(_text: &str) -> Result<(), String> {
    Err("no clipboard outside the browser".to_string())
}

#[cfg(target_arch = "wasm32")]
fn select_input(id: &str) -> bool {
    use wasm_bindgen::JsCast;

    let input = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok());
    match input {
        Some(input) => {
            input.select();
            true
        }
        None => {
            tracing::warn!("key input #{} not found", id);
            false
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn select_input(_id: &str) -> bool {
    false
}
