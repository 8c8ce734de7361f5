//! Persisted console settings and change notifications.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::SettingsManager;

const SETTING_THEME: &str = "THEME";
const CHANGE_CAPACITY: usize = 16;

/// Display theme chosen by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Auto,
    Dark,
    DarkNoGlass,
    Light,
}

impl Theme {
    /// Parse a stored value. Unknown values read as [`Theme::Auto`].
    pub fn from_str_setting(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dark" => Self::Dark,
            "dark-no-glass" => Self::DarkNoGlass,
            "light" => Self::Light,
            "auto" => Self::Auto,
            other => {
                tracing::debug!(theme = other, "Unrecognized theme, using auto");
                Self::Auto
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::DarkNoGlass => "dark-no-glass",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The current settings value. Always replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
}

/// Source of the current settings and of change notifications.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_settings(&self) -> Result<Settings, anyhow::Error>;

    /// Receiver that yields every settings value saved after this call.
    fn settings_changed(&self) -> broadcast::Receiver<Settings>;
}

/// [`SettingsStore`] backed by the settings table.
pub struct DbSettingsStore {
    sm: SettingsManager,
    changes: broadcast::Sender<Settings>,
}

impl DbSettingsStore {
    pub fn new(sm: SettingsManager) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self { sm, changes }
    }

    /// Persist `settings` and notify subscribers.
    pub fn save(&self, settings: Settings) -> Result<(), anyhow::Error> {
        self.sm.set_setting(SETTING_THEME, settings.theme.as_str())?;
        tracing::info!(theme = %settings.theme, "Settings saved");
        let _ = self.changes.send(settings);
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for DbSettingsStore {
    async fn get_settings(&self) -> Result<Settings, anyhow::Error> {
        let theme = self.sm.get_setting(SETTING_THEME)?;
        Ok(Settings {
            theme: Theme::from_str_setting(&theme),
        })
    }

    fn settings_changed(&self) -> broadcast::Receiver<Settings> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use console_db::Database;

    use super::*;

    fn store() -> DbSettingsStore {
        DbSettingsStore::new(SettingsManager::new(Database::open_in_memory().unwrap()))
    }

    #[test]
    fn theme_parsing_is_permissive() {
        assert_eq!(Theme::from_str_setting("dark"), Theme::Dark);
        assert_eq!(Theme::from_str_setting("Dark-No-Glass"), Theme::DarkNoGlass);
        assert_eq!(Theme::from_str_setting("light"), Theme::Light);
        assert_eq!(Theme::from_str_setting("solarized"), Theme::Auto);
        assert_eq!(Theme::from_str_setting(""), Theme::Auto);
    }

    #[tokio::test]
    async fn default_settings_are_auto() {
        let store = store();
        assert_eq!(store.get_settings().await.unwrap().theme, Theme::Auto);
    }

    #[tokio::test]
    async fn unknown_persisted_theme_reads_as_auto() {
        let store = store();
        store.sm.db().set_setting(SETTING_THEME, "neon", "normal").unwrap();
        assert_eq!(store.get_settings().await.unwrap().theme, Theme::Auto);
    }

    #[tokio::test]
    async fn save_persists_and_broadcasts() {
        let store = store();
        let mut changes = store.settings_changed();

        store.save(Settings { theme: Theme::Light }).unwrap();

        assert_eq!(changes.recv().await.unwrap().theme, Theme::Light);
        assert_eq!(store.get_settings().await.unwrap().theme, Theme::Light);
    }
}
