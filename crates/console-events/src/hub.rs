//! In-process fan-out of the unified event feed.

use tokio::sync::broadcast;

use crate::EventError;
use crate::model::{Category, Event};

const HUB_CAPACITY: usize = 256;

/// Produces per-category views of the unified event feed.
pub trait EventSource: Send + Sync {
    /// Open a new receiver that yields only events in `category`,
    /// in the order they were published.
    fn subscribe(&self, category: Category) -> CategoryReceiver;
}

/// Broadcast hub that the transport layer publishes into.
#[derive(Clone)]
pub struct EventHub {
    tx: broadcast::Sender<Event>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::with_capacity(HUB_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Returns the number of receivers that will see it.
    pub fn publish(&self, event: impl Into<Event>) -> usize {
        let event = event.into();
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!("Event published with no active receivers");
                0
            }
        }
    }

    /// Decode a JSON event and publish it.
    pub fn publish_json(&self, text: &str) -> Result<usize, EventError> {
        let event = Event::from_json(text)?;
        Ok(self.publish(event))
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for EventHub {
    fn subscribe(&self, category: Category) -> CategoryReceiver {
        CategoryReceiver {
            category,
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiver filtered down to one category.
pub struct CategoryReceiver {
    category: Category,
    rx: broadcast::Receiver<Event>,
}

impl CategoryReceiver {
    pub fn category(&self) -> Category {
        self.category
    }

    /// Wait for the next event in this category.
    ///
    /// Returns [`EventError::Lagged`] when events were dropped for this
    /// receiver; the receiver stays usable afterwards.
    pub async fn recv(&mut self) -> Result<Event, EventError> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.category() == Some(self.category) => return Ok(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    return Err(EventError::Lagged(skipped));
                }
                Err(broadcast::error::RecvError::Closed) => return Err(EventError::Closed),
            }
        }
    }
}
