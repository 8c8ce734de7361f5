//! Event payloads as delivered by the backend.
//!
//! Nested payloads (`session`, `job`, `client`) are optional on the wire.
//! Consumers must treat a missing payload as an incomplete event rather
//! than a fault.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::EventError;

pub const EVENT_SESSION_CONNECTED: &str = "session-connected";
pub const EVENT_SESSION_DISCONNECTED: &str = "session-disconnected";
pub const EVENT_SESSION_UPDATED: &str = "session-updated";
pub const EVENT_CLIENT_JOINED: &str = "client-joined";
pub const EVENT_CLIENT_LEFT: &str = "client-left";
pub const EVENT_JOB_STARTED: &str = "job-started";
pub const EVENT_JOB_STOPPED: &str = "job-stopped";

const DEFAULT_ACK_LABEL: &str = "Dismiss";
const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Named sub-stream of the unified event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sessions,
    Players,
    Jobs,
    Notifications,
    Menu,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Sessions,
        Category::Players,
        Category::Jobs,
        Category::Notifications,
        Category::Menu,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sessions => "sessions",
            Self::Players => "players",
            Self::Jobs => "jobs",
            Self::Notifications => "notifications",
            Self::Menu => "menu",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of a server event.
///
/// Unknown tags are preserved in [`EventKind::Other`] and never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    SessionConnected,
    SessionDisconnected,
    SessionUpdated,
    ClientJoined,
    ClientLeft,
    JobStarted,
    JobStopped,
    Other(String),
}

impl EventKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SessionConnected => EVENT_SESSION_CONNECTED,
            Self::SessionDisconnected => EVENT_SESSION_DISCONNECTED,
            Self::SessionUpdated => EVENT_SESSION_UPDATED,
            Self::ClientJoined => EVENT_CLIENT_JOINED,
            Self::ClientLeft => EVENT_CLIENT_LEFT,
            Self::JobStarted => EVENT_JOB_STARTED,
            Self::JobStopped => EVENT_JOB_STOPPED,
            Self::Other(tag) => tag,
        }
    }

    /// Category the backend files this kind under, if any.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::SessionConnected | Self::SessionDisconnected | Self::SessionUpdated => {
                Some(Category::Sessions)
            }
            Self::ClientJoined | Self::ClientLeft => Some(Category::Players),
            Self::JobStarted | Self::JobStopped => Some(Category::Jobs),
            Self::Other(tag) => {
                if tag.starts_with("session") {
                    Some(Category::Sessions)
                } else if tag.starts_with("client") {
                    Some(Category::Players)
                } else if tag.starts_with("job") {
                    Some(Category::Jobs)
                } else {
                    None
                }
            }
        }
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            EVENT_SESSION_CONNECTED => Self::SessionConnected,
            EVENT_SESSION_DISCONNECTED => Self::SessionDisconnected,
            EVENT_SESSION_UPDATED => Self::SessionUpdated,
            EVENT_CLIENT_JOINED => Self::ClientJoined,
            EVENT_CLIENT_LEFT => Self::ClientLeft,
            EVENT_JOB_STARTED => Self::JobStarted,
            EVENT_JOB_STOPPED => Self::JobStopped,
            _ => Self::Other(tag),
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub id: u32,
    pub name: String,
    pub hostname: String,
    pub remote_address: String,
    pub transport: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: u32,
    pub protocol: String,
    pub name: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operator {
    pub name: String,
}

/// A connected console client; the operator may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub id: u32,
    pub operator: Option<Operator>,
}

/// An event pushed by the backend server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEvent {
    #[serde(rename = "eventType")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
}

impl ServerEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            session: None,
            job: None,
            client: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_job(mut self, job: Job) -> Self {
        self.job = Some(job);
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }
}

/// Zero-argument action attached to a notification.
///
/// Shared and immutable so the event stays cheap to clone; the alert layer
/// decides how many times it runs.
#[derive(Clone)]
pub struct AckCallback(Arc<dyn Fn() + Send + Sync>);

impl AckCallback {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for AckCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AckCallback(..)")
    }
}

/// Generic in-app notification raised by other parts of the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    #[serde(default = "default_ack_label")]
    pub acknowledge_label: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(skip)]
    pub on_acknowledge: Option<AckCallback>,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            acknowledge_label: default_ack_label(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            on_acknowledge: None,
        }
    }
}

fn default_ack_label() -> String {
    DEFAULT_ACK_LABEL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// Application menu button identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuButton {
    Back,
    Forward,
    About,
    Other(String),
}

impl From<String> for MenuButton {
    fn from(button: String) -> Self {
        match button.as_str() {
            "back" => Self::Back,
            "forward" => Self::Forward,
            "about" => Self::About,
            _ => Self::Other(button),
        }
    }
}

impl From<MenuButton> for String {
    fn from(button: MenuButton) -> Self {
        match button {
            MenuButton::Back => "back".into(),
            MenuButton::Forward => "forward".into(),
            MenuButton::About => "about".into(),
            MenuButton::Other(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCommand {
    pub button: MenuButton,
}

/// A single entry on the unified feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Event {
    Server(ServerEvent),
    Notification(Notification),
    Menu(MenuCommand),
}

impl Event {
    /// Decode one event from its JSON wire form.
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Server(event) => event.kind.category(),
            Self::Notification(_) => Some(Category::Notifications),
            Self::Menu(_) => Some(Category::Menu),
        }
    }

    pub fn as_server(&self) -> Option<&ServerEvent> {
        match self {
            Self::Server(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Self::Notification(notification) => Some(notification),
            _ => None,
        }
    }

    pub fn as_menu(&self) -> Option<&MenuCommand> {
        match self {
            Self::Menu(command) => Some(command),
            _ => None,
        }
    }
}

impl From<ServerEvent> for Event {
    fn from(event: ServerEvent) -> Self {
        Self::Server(event)
    }
}

impl From<Notification> for Event {
    fn from(notification: Notification) -> Self {
        Self::Notification(notification)
    }
}

impl From<MenuButton> for Event {
    fn from(button: MenuButton) -> Self {
        Self::Menu(MenuCommand { button })
    }
}
