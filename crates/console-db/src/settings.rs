//! Settings rows: one value per key, tagged with the kind of setting.

use rusqlite::{OptionalExtension, params};

use crate::{Database, DbError};

impl Database {
    /// Stored value for `key`, or `None` when no row exists.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, DbError> {
        self.with_conn(|conn| {
            let value = conn
                .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    /// Insert or overwrite `key`. Empty keys are rejected.
    pub fn set_setting(&self, key: &str, value: &str, setting_type: &str) -> Result<(), DbError> {
        if key.is_empty() {
            return Err(DbError::InvalidData("setting key must not be empty".into()));
        }
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value, setting_type, updated_at)
                 VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     setting_type = excluded.setting_type,
                     updated_at = CURRENT_TIMESTAMP",
                params![key, value, setting_type],
            )?;
            Ok(())
        })
    }
}
