//! Best-effort desktop notifications.

use tokio::process::Command;

use crate::platform::Platform;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("system notifications are disabled")]
    Disabled,

    #[error("failed to launch notifier: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Side channel for OS-level notifications. Failures never block alerts.
pub trait SystemNotifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Shells out to the platform notifier without waiting for it.
pub struct DesktopNotifier {
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl SystemNotifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        if !self.enabled {
            return Err(NotifyError::Disabled);
        }
        let mut command = match Platform::current() {
            Platform::MacOS => {
                let mut c = Command::new("osascript");
                c.arg("-e").arg(apple_script(title, body));
                c
            }
            Platform::Other => {
                let mut c = Command::new("notify-send");
                c.arg(title).arg(body);
                c
            }
        };
        command.spawn()?;
        Ok(())
    }
}

fn apple_script(title: &str, body: &str) -> String {
    format!(
        "display notification \"{}\" with title \"{}\"",
        escape_quotes(body),
        escape_quotes(title)
    )
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
