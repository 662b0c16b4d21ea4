use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{window, Storage, UrlSearchParams};

use crate::ports::{LinkPort, StoragePort};

/// `window.localStorage`, or nothing when the browser refuses access.
pub struct BrowserStorage {
    storage: Option<Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            warn!("local storage is unavailable, wheels will not be saved");
        }
        Self { storage }
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.set_item(key, value) {
                warn!("failed to write {} to local storage: {:?}", key, e);
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.remove_item(key) {
                warn!("failed to remove {} from local storage: {:?}", key, e);
            }
        }
    }
}

/// `window.location` for reads, `history.replaceState` for writes.
#[derive(Default)]
pub struct BrowserLink;

impl BrowserLink {
    fn replace_url(&self, url: &str) {
        let Some(history) = window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(url)) {
            warn!("failed to update the address bar: {:?}", e);
        }
    }
}

impl LinkPort for BrowserLink {
    fn query_param(&self, name: &str) -> Option<String> {
        let search = window()?.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(name)
    }

    fn set_query_param(&self, name: &str, value: &str) {
        let Ok(params) = UrlSearchParams::new() else {
            return;
        };
        params.set(name, value);
        let query = String::from(params.to_string());
        self.replace_url(&format!("/?{}", query));
    }

    fn clear_query(&self) {
        self.replace_url("/");
    }

    fn origin(&self) -> String {
        window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
}
