//! Alert type definitions.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one presented alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(Uuid);

impl AlertId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Follow-up attached to an alert's action control. Runs at most once.
pub struct Continuation(Box<dyn FnOnce() + Send>);

impl Continuation {
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Continuation(..)")
    }
}

/// Request to present a dismissible, optionally actionable alert.
///
/// A zero timeout keeps the alert up until it is acted on or replaced.
#[derive(Debug)]
pub struct AlertRequest {
    pub message: String,
    pub action_label: String,
    pub timeout: Duration,
    pub on_action: Option<Continuation>,
}

impl AlertRequest {
    pub fn new(message: impl Into<String>, action_label: impl Into<String>, timeout: Duration) -> Self {
        Self {
            message: message.into(),
            action_label: action_label.into(),
            timeout,
            on_action: None,
        }
    }

    pub fn dismissible(message: impl Into<String>, timeout: Duration) -> Self {
        Self::new(message, "Dismiss", timeout)
    }

    pub fn with_continuation(mut self, continuation: Continuation) -> Self {
        self.on_action = Some(continuation);
        self
    }
}

/// How the queue treats an alert arriving while another is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Queue,
    #[default]
    Overwrite,
}

impl DisplayMode {
    pub fn from_str_setting(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "queue" => Self::Queue,
            _ => Self::Overwrite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogId {
    About,
}

/// Content of the about dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub name: String,
    pub version: String,
}

impl AboutInfo {
    pub fn current() -> Self {
        Self {
            name: "Operator Console".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    Action,
    Timeout,
    Replaced,
    Closed,
}

/// Presentation state changes broadcast to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertUpdate {
    Shown {
        id: AlertId,
        message: String,
        action_label: String,
        timeout_ms: u64,
        shown_at: DateTime<Utc>,
    },
    Dismissed {
        id: AlertId,
        reason: DismissReason,
    },
    Dialog {
        dialog: DialogId,
        about: AboutInfo,
    },
}
