//! Persisted user settings (currently only the quality preset).

use crate::config::QualityPreset;
use crate::error::SettingsError;
use std::collections::HashMap;

pub const QUALITY_KEY: &str = "tree.quality";

/// Key/value storage that survives sessions on the web (`localStorage`).
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Session-only store, used when persistent storage is unavailable.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Stored preset, or the default when missing or unreadable.
pub fn load_quality(store: &dyn SettingsStore) -> QualityPreset {
    match store.get(QUALITY_KEY) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("[quality] ignoring stored value {:?}", raw);
            QualityPreset::default()
        }),
        None => QualityPreset::default(),
    }
}

pub fn save_quality(store: &mut dyn SettingsStore, preset: QualityPreset) -> Result<(), SettingsError> {
    store.set(QUALITY_KEY, preset.as_str())
}
