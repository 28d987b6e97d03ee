//! Location, session history and `localStorage`

use wasm_bindgen::JsValue;
use web_sys::Window;

use folio_core::{HistoryState, Navigator, Storage};

const URL_KEY: &str = "url";

pub struct BrowserNavigator {
    window: Window,
}

impl BrowserNavigator {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn history(&self) -> Option<web_sys::History> {
        match self.window.history() {
            Ok(history) => Some(history),
            Err(err) => {
                tracing::warn!("History API unavailable: {:?}", err);
                None
            }
        }
    }
}

impl Navigator for BrowserNavigator {
    fn pathname(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn push_state(&mut self, state: &HistoryState) {
        let Some(history) = self.history() else {
            return;
        };
        if let Err(err) = history.push_state_with_url(&state_to_js(state), "", Some(&state.url)) {
            tracing::warn!("pushState({}) failed: {:?}", state.url, err);
        }
    }

    fn replace_state(&mut self, state: &HistoryState) {
        let Some(history) = self.history() else {
            return;
        };
        let title = self
            .window
            .document()
            .map(|document| document.title())
            .unwrap_or_default();
        if let Err(err) = history.replace_state_with_url(&state_to_js(state), &title, Some(&state.url))
        {
            tracing::warn!("replaceState({}) failed: {:?}", state.url, err);
        }
    }

    fn assign(&mut self, url: &str) {
        if let Err(err) = self.window.location().assign(url) {
            tracing::error!("Navigation to {} failed: {:?}", url, err);
        }
    }
}

/// `{ url }` object stored with each history entry
pub(crate) fn state_to_js(state: &HistoryState) -> JsValue {
    let object = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&object, &JsValue::from_str(URL_KEY), &JsValue::from_str(&state.url));
    object.into()
}

/// Read back a state written by [`state_to_js`]; foreign states yield `None`
pub(crate) fn state_from_js(value: &JsValue) -> Option<HistoryState> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    js_sys::Reflect::get(value, &JsValue::from_str(URL_KEY))
        .ok()?
        .as_string()
        .map(HistoryState::new)
}

/// `window.localStorage`; absent (private mode, sandboxed frames) means
/// reads miss and writes are dropped
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!("localStorage unavailable: {:?}", err);
                None
            }
        };
        Self { storage }
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.set_item(key, value) {
                tracing::warn!("localStorage.setItem({}) failed: {:?}", key, err);
            }
        }
    }

    fn remove_item(&mut self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}
