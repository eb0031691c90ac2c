use tree_core::{MemoryStore, SettingsError, SettingsStore};
use web_sys as web;

/// `localStorage` backed settings.
pub struct LocalStore {
    storage: web::Storage,
}

impl SettingsStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| SettingsError::Write {
                key: key.to_owned(),
                reason: format!("{:?}", e),
            })
    }
}

/// `localStorage` when the browser allows it (private modes may throw),
/// otherwise a store that lasts for this page only.
pub fn open_settings() -> Box<dyn SettingsStore> {
    match web::window().map(|w| w.local_storage()) {
        Some(Ok(Some(storage))) => Box::new(LocalStore { storage }),
        _ => {
            log::warn!("[quality] localStorage unavailable, settings kept in memory");
            Box::new(MemoryStore::default())
        }
    }
}
