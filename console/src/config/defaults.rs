//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Setting keys and their defaults.
///
/// `SYSTEM_THEME` pins the host dark preference (`dark` / `light`); empty
/// means detect it.
const DEFS: &[(&str, &str)] = &[
    ("THEME", "auto"),
    ("ALERT_DISPLAY_MODE", "overwrite"),
    ("ALERT_DURATION_SECONDS", "5"),
    ("SYSTEM_NOTIFICATIONS_ENABLED", "true"),
    ("NOTIFICATION_TITLE", "Operator Console"),
    ("SYSTEM_THEME", ""),
    ("MAIN_WINDOW_ORIGIN", "app://console"),
    ("WINDOW_ORIGIN", "app://console"),
];

/// Default values indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DEFS.iter().copied().collect());

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).copied()
}
