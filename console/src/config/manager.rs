//! SettingsManager: DB-backed settings with defaults and env migration.

use console_db::Database;

use super::defaults::{DEFAULT_SETTINGS, get_default};
use super::validation::validate_setting;

/// Environment variables named `CONSOLE_<KEY>` seed the DB on first run.
const ENV_PREFIX: &str = "CONSOLE_";

/// Wraps [`Database`] to provide high-level settings operations.
#[derive(Clone)]
pub struct SettingsManager {
    db: Database,
}

impl SettingsManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a setting value. Falls back to default if not in DB.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        if let Some(val) = self.db.get_setting(key)? {
            return Ok(val);
        }
        if let Some(default) = get_default(key) {
            return Ok(default.to_string());
        }
        anyhow::bail!("setting not found: {key}");
    }

    /// Set a setting value with validation.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        if !DEFAULT_SETTINGS.contains_key(key) {
            anyhow::bail!("unknown setting key: {key}");
        }

        validate_setting(key, value)
            .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;

        self.db.set_setting(key, value, "normal")?;
        Ok(())
    }

    /// Initialize default settings in DB (skip existing).
    pub fn initialize_defaults(&self) -> Result<(), anyhow::Error> {
        for (key, default) in DEFAULT_SETTINGS.iter() {
            if self.db.get_setting(key)?.is_some() {
                continue;
            }
            self.db.set_setting(key, default, "normal")?;
        }
        Ok(())
    }

    /// Migrate settings from environment variables to DB (one-time).
    pub fn migrate_from_env(&self) -> Result<u32, anyhow::Error> {
        self.migrate_from(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    fn migrate_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<u32, anyhow::Error> {
        let mut migrated = 0u32;
        for key in DEFAULT_SETTINGS.keys() {
            if self.db.get_setting(key)?.is_some() {
                continue;
            }
            let Some(env_val) = lookup(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Err(e) = validate_setting(key, &env_val) {
                tracing::warn!("Ignoring {ENV_PREFIX}{key} from env: {e}");
                continue;
            }
            self.db.set_setting(key, &env_val, "normal")?;
            tracing::info!("Migrated setting from env: {key}");
            migrated += 1;
        }
        if migrated > 0 {
            tracing::info!("Migration completed: {migrated} settings migrated");
        }
        Ok(migrated)
    }

    #[cfg(test)]
    pub(crate) fn db(&self) -> &Database {
        &self.db
    }
}
