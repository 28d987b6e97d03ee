//! Folio Web
//!
//! Browser host for the Folio page runtime: a [`Document`](folio_core::Document)
//! over the live DOM, history and `localStorage` adapters, console logging
//! and the event pump that feeds the runtime.
//!
//! The module starts itself when loaded. Site configuration is read from an
//! optional inline script:
//!
//! ```html
//! <script type="application/toml" id="folio-config">
//! [features]
//! theme_toggle = true
//! </script>
//! ```

pub mod console;
pub mod document;
pub mod host;
pub mod navigator;
pub mod queue;
pub mod registry;

pub use document::WebDocument;
pub use host::{Host, WebApp};
pub use navigator::{BrowserNavigator, LocalStorage};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use folio_app::{AppError, SiteConfig};

/// Id of the inline configuration script
pub const CONFIG_SCRIPT_ID: &str = "folio-config";

/// Parse the inline configuration; a missing script means defaults
pub fn parse_config(source: Option<&str>) -> Result<SiteConfig, AppError> {
    match source {
        Some(text) if !text.trim().is_empty() => SiteConfig::from_toml_str(text),
        _ => Ok(SiteConfig::default()),
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let source = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|script| script.text_content());
    let (config, config_error) = match parse_config(source.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    };
    console::init(&config.log_filter);
    if let Some(err) = config_error {
        tracing::error!("Invalid site configuration, using defaults: {}", err);
    }

    let host = Host::new(window, document.clone(), config)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Err(err) = host.start() {
                tracing::error!("Failed to start page runtime: {:?}", err);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        host.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        assert_eq!(parse_config(None).unwrap(), SiteConfig::default());
        assert_eq!(parse_config(Some("\n  \n")).unwrap(), SiteConfig::default());

        let config = parse_config(Some("[features]\ntheme_toggle = true\n")).unwrap();
        assert!(config.features.theme_toggle);

        assert!(matches!(
            parse_config(Some("[roles]\nnavbar = \"nav a\"\n")),
            Err(AppError::Folio(_))
        ));
    }
}
