//! Event model and in-process event hub for the operator console.
//!
//! The backend delivers a single ordered feed of tagged events. The hub
//! rebroadcasts that feed and hands out per-category receivers so that
//! consumers only see the sub-stream they asked for.

pub mod hub;
pub mod model;

pub use hub::{CategoryReceiver, EventHub, EventSource};
pub use model::{
    AckCallback, Category, Client, Event, EventKind, Job, MenuButton, MenuCommand, Notification,
    Operator, ServerEvent, Session,
};

/// Unified error type for the console-events crate.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Event hub closed")]
    Closed,

    #[error("Receiver lagged behind, {0} events skipped")]
    Lagged(u64),
}
