//! Runtime application configuration loaded from the settings DB.

use std::time::Duration;

use super::manager::SettingsManager;
use crate::alerts::DisplayMode;

/// Runtime configuration populated from the settings DB.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub alert_display_mode: DisplayMode,
    pub alert_duration_seconds: u64,
    pub system_notifications_enabled: bool,
    pub notification_title: String,
    pub system_theme_override: Option<bool>,
    pub main_window_origin: String,
    pub window_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alert_display_mode: DisplayMode::Overwrite,
            alert_duration_seconds: 5,
            system_notifications_enabled: true,
            notification_title: "Operator Console".into(),
            system_theme_override: None,
            main_window_origin: "app://console".into(),
            window_origin: "app://console".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager.
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };
        let defaults = Self::default();

        Ok(Self {
            alert_display_mode: DisplayMode::from_str_setting(&g("ALERT_DISPLAY_MODE")),
            alert_duration_seconds: parse_u64(
                &g("ALERT_DURATION_SECONDS"),
                defaults.alert_duration_seconds,
            )
            .max(1),
            system_notifications_enabled: g("SYSTEM_NOTIFICATIONS_ENABLED") == "true",
            notification_title: non_empty_or(g("NOTIFICATION_TITLE"), defaults.notification_title),
            system_theme_override: match g("SYSTEM_THEME").as_str() {
                "dark" => Some(true),
                "light" => Some(false),
                _ => None,
            },
            main_window_origin: non_empty_or(g("MAIN_WINDOW_ORIGIN"), defaults.main_window_origin),
            window_origin: non_empty_or(g("WINDOW_ORIGIN"), defaults.window_origin),
        })
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_secs(self.alert_duration_seconds)
    }
}

fn non_empty_or(value: String, fallback: String) -> String {
    if value.is_empty() { fallback } else { value }
}

fn parse_u64(s: &str, default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
