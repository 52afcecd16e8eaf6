//! `localStorage`-backed state persistence.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::Storage;

use miqat_core::store::StatePersistence;

/// Storage key used for the signed-in session.
pub const AUTH_STORAGE_KEY: &str = "miqat.auth";

/// Persists a store's state as JSON under one `localStorage` key.
///
/// Storage being unavailable (private browsing, disabled cookies) or
/// holding unparseable data is logged and treated as "nothing saved".
#[derive(Debug, Clone)]
pub struct LocalStoragePersistence<S> {
    key: String,
    _state: PhantomData<fn() -> S>,
}

impl<S> LocalStoragePersistence<S> {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _state: PhantomData,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Remove the saved value.
    pub fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

impl<S: Serialize + DeserializeOwned> StatePersistence<S> for LocalStoragePersistence<S> {
    fn load(&self) -> Option<S> {
        let raw = local_storage()?.get_item(&self.key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                log::warn!("ignoring unreadable saved state under {}: {e}", self.key);
                None
            }
        }
    }

    fn save(&self, state: &S) {
        let Some(storage) = local_storage() else {
            log::debug!("localStorage unavailable; {} not saved", self.key);
            return;
        };
        match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(e) = storage.set_item(&self.key, &json) {
                    log::warn!("failed to save {}: {e:?}", self.key);
                }
            }
            Err(e) => log::warn!("failed to serialize {}: {e}", self.key),
        }
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
