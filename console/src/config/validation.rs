//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_ORIGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9+.\-]*://[A-Za-z0-9.\-]+(:[0-9]{1,5})?$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
///
/// `THEME` is deliberately absent: unknown themes fall through to auto
/// resolution when read back.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "ALERT_DISPLAY_MODE" => {
            if value != "queue" && value != "overwrite" {
                return Err("must be 'queue' or 'overwrite'".into());
            }
        }
        "ALERT_DURATION_SECONDS" => validate_int_range(value, 1, 60)?,
        "SYSTEM_THEME" => {
            if !value.is_empty() && value != "dark" && value != "light" {
                return Err("must be 'dark', 'light' or empty".into());
            }
        }
        "NOTIFICATION_TITLE" => {
            if value.len() > 64 {
                return Err("title must be at most 64 characters".into());
            }
        }
        "MAIN_WINDOW_ORIGIN" | "WINDOW_ORIGIN" => {
            if !RE_ORIGIN.is_match(value) {
                return Err("invalid origin (expected scheme://host[:port])".into());
            }
        }
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "SYSTEM_NOTIFICATIONS_ENABLED")
}
