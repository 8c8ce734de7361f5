//! JSON-lines control input for the headless console.
//!
//! Each line is one command tagged by `op`:
//!
//! ```text
//! {"op":"event","event":{"source":"server","eventType":"session-connected","session":{"id":1}}}
//! {"op":"ack","id":"6f1c...-..."}
//! {"op":"theme","theme":"light"}
//! ```

use console_events::Event;
use serde::Deserialize;

use crate::alerts::AlertId;
use crate::bootstrap::Console;
use crate::settings::{Settings, Theme};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("malformed command: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid alert id: {0}")]
    AlertId(String),
}

/// One parsed control command.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InputCommand {
    Event { event: Event },
    Ack { id: String },
    Theme { theme: String },
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<InputCommand>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Apply a command to a running console.
pub fn apply(console: &Console, command: InputCommand) -> Result<(), anyhow::Error> {
    match command {
        InputCommand::Event { event } => {
            let category = event.category();
            let receivers = console.hub.publish(event);
            tracing::debug!(?category, receivers, "Event published");
        }
        InputCommand::Ack { id } => {
            let id = AlertId::parse(&id).ok_or(InputError::AlertId(id))?;
            if console.queue.trigger_action(id) {
                tracing::debug!(alert_id = %id, "Alert action delivered to queue");
            }
        }
        InputCommand::Theme { theme } => {
            console.settings.save(Settings {
                theme: Theme::from_str_setting(&theme),
            })?;
        }
    }
    Ok(())
}
