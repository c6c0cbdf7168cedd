//! Browser-backed session storage and notifications

use libris_core::{CoreError, CoreResult, Notifier, TokenStore};
use web_sys::Storage;

/// Get localStorage
fn get_local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Raw token kept in `localStorage` under a fixed key
#[derive(Debug, Clone)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        get_local_storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) -> CoreResult<()> {
        let storage = get_local_storage()
            .ok_or_else(|| CoreError::Storage("localStorage is unavailable".to_string()))?;
        storage
            .set_item(&self.key, token)
            .map_err(|e| CoreError::Storage(format!("{e:?}")))
    }

    fn remove(&self) -> CoreResult<()> {
        let Some(storage) = get_local_storage() else {
            return Ok(());
        };
        storage
            .remove_item(&self.key)
            .map_err(|e| CoreError::Storage(format!("{e:?}")))
    }
}

/// Blocking `window.alert`
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, message: &str) {
        let shown = web_sys::window()
            .map(|w| w.alert_with_message(message).is_ok())
            .unwrap_or(false);
        if !shown {
            tracing::warn!("{message}");
        }
    }
}
