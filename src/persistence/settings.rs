use super::KeyValueStore;
use crate::domain::ModeDurations;
use anyhow::{Context, Result};

/// Storage key holding the committed mode durations
pub const SETTINGS_KEY: &str = "settings";

/// Committed mode durations, persisted as a small JSON object
pub struct SettingsStore {
    store: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read(&self) -> Result<Option<ModeDurations>> {
        match self.store.get(SETTINGS_KEY)? {
            Some(json) => {
                let durations: ModeDurations =
                    serde_json::from_str(&json).context("Failed to parse stored settings")?;
                Ok(Some(durations.sanitized()))
            }
            None => Ok(None),
        }
    }

    /// Load durations, falling back to the defaults if absent or unreadable
    pub fn load(&self) -> ModeDurations {
        match self.read() {
            Ok(Some(durations)) => durations,
            Ok(None) => ModeDurations::default(),
            Err(e) => {
                tracing::warn!("Using default mode durations: {:#}", e);
                ModeDurations::default()
            }
        }
    }

    pub fn save(&mut self, durations: &ModeDurations) {
        let result = serde_json::to_string_pretty(durations)
            .context("Failed to serialize settings")
            .and_then(|json| self.store.set(SETTINGS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save settings: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::kv::MemoryStore;
    use tempfile::tempdir;

    #[test]
    fn test_load_absent_settings() {
        let settings = SettingsStore::new(Box::new(MemoryStore::new()));
        assert_eq!(settings.load(), ModeDurations::default());
    }

    #[test]
    fn test_load_malformed_settings() {
        let mut store = MemoryStore::new();
        store.set(SETTINGS_KEY, "{ focus: nope").unwrap();
        let settings = SettingsStore::new(Box::new(store));
        assert_eq!(settings.load(), ModeDurations::default());
    }

    #[test]
    fn test_save_and_load_settings() {
        let temp_dir = tempdir().unwrap();
        let durations = ModeDurations {
            focus: 50,
            short_break: 10,
            long_break: 30,
        };

        let mut settings =
            SettingsStore::new(Box::new(crate::persistence::FileStore::new(temp_dir.path())));
        settings.save(&durations);

        let reloaded =
            SettingsStore::new(Box::new(crate::persistence::FileStore::new(temp_dir.path())));
        assert_eq!(reloaded.load(), durations);
        assert!(temp_dir.path().join("settings.json").exists());
    }
}
