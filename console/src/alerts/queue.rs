//! Alert queue and worker.
//!
//! Displays one alert at a time. In queue mode alerts wait their turn; in
//! overwrite mode a newer alert dismisses the one on screen. Each alert's
//! continuation runs only if its action is triggered while it is displayed.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc};
use tokio::time::sleep;

use super::types::{
    AboutInfo, AlertId, AlertRequest, AlertUpdate, DialogId, DismissReason, DisplayMode,
};

const QUEUE_CAPACITY: usize = 100;
const UPDATE_CAPACITY: usize = 256;
const QUEUE_GAP: Duration = Duration::from_millis(200);

/// Presentation service used by the alert handlers. Fire-and-forget.
pub trait Presenter: Send + Sync {
    fn show_alert(&self, request: AlertRequest) -> AlertId;
    fn show_dialog(&self, dialog: DialogId);
}

enum Command {
    Show(AlertId, AlertRequest),
    Action(AlertId),
    Close,
}

/// Handle to the alert worker.
pub struct AlertQueue {
    tx: mpsc::Sender<Command>,
    updates: broadcast::Sender<AlertUpdate>,
}

impl AlertQueue {
    /// Start the worker on the current runtime.
    pub fn start(mode: DisplayMode) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);

        tokio::spawn(worker_loop(mode, rx, updates.clone()));
        tracing::info!(?mode, "Alert queue worker started");

        Self { tx, updates }
    }

    /// Receive presentation updates.
    pub fn subscribe(&self) -> broadcast::Receiver<AlertUpdate> {
        self.updates.subscribe()
    }

    /// Report that the user pressed the action control on alert `id`.
    ///
    /// Returns whether the report was accepted for delivery to the worker.
    /// The worker ignores it unless `id` is still the displayed alert.
    pub fn trigger_action(&self, id: AlertId) -> bool {
        match self.tx.try_send(Command::Action(id)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(alert_id = %id, "Alert action dropped: {e}");
                false
            }
        }
    }

    /// Dismiss whatever is displayed and stop the worker.
    pub async fn close(&self) {
        if self.tx.send(Command::Close).await.is_err() {
            tracing::debug!("Alert queue already closed");
        }
    }
}

impl Presenter for AlertQueue {
    fn show_alert(&self, request: AlertRequest) -> AlertId {
        let id = AlertId::new();
        if let Err(e) = self.tx.try_send(Command::Show(id, request)) {
            tracing::warn!(alert_id = %id, "Alert queue full or closed: {e}");
        }
        id
    }

    fn show_dialog(&self, dialog: DialogId) {
        tracing::info!(?dialog, "Opening dialog");
        let _ = self.updates.send(AlertUpdate::Dialog {
            dialog,
            about: AboutInfo::current(),
        });
    }
}

/// Worker loop: shows alerts and waits for action, timeout or replacement.
async fn worker_loop(
    mode: DisplayMode,
    mut rx: mpsc::Receiver<Command>,
    updates: broadcast::Sender<AlertUpdate>,
) {
    let mut pending: VecDeque<(AlertId, AlertRequest)> = VecDeque::new();

    'outer: loop {
        let (id, request) = match pending.pop_front() {
            Some(next) => next,
            None => match rx.recv().await {
                Some(Command::Show(id, request)) => (id, request),
                Some(Command::Action(id)) => {
                    tracing::debug!(alert_id = %id, "Action for alert no longer displayed");
                    continue;
                }
                Some(Command::Close) | None => break,
            },
        };

        let AlertRequest {
            message,
            action_label,
            timeout,
            mut on_action,
        } = request;

        tracing::debug!(alert_id = %id, %message, "Showing alert");
        let _ = updates.send(AlertUpdate::Shown {
            id,
            message,
            action_label,
            timeout_ms: timeout_millis(timeout),
            shown_at: Utc::now(),
        });

        let expiry = expire_after(timeout);
        tokio::pin!(expiry);

        let mut closing = false;
        let reason = loop {
            tokio::select! {
                _ = &mut expiry => break DismissReason::Timeout,
                command = rx.recv() => match command {
                    Some(Command::Action(target)) if target == id => {
                        if let Some(continuation) = on_action.take() {
                            continuation.run();
                        }
                        break DismissReason::Action;
                    }
                    Some(Command::Action(stale)) => {
                        tracing::debug!(alert_id = %stale, "Action for alert no longer displayed");
                    }
                    Some(Command::Show(next_id, next)) => match mode {
                        DisplayMode::Overwrite => {
                            pending.push_front((next_id, next));
                            break DismissReason::Replaced;
                        }
                        DisplayMode::Queue => pending.push_back((next_id, next)),
                    },
                    Some(Command::Close) | None => {
                        closing = true;
                        break DismissReason::Closed;
                    }
                },
            }
        };

        // An unused continuation is discarded with its alert.
        drop(on_action);
        let _ = updates.send(AlertUpdate::Dismissed { id, reason });
        tracing::debug!(alert_id = %id, ?reason, "Alert dismissed");

        if closing {
            break 'outer;
        }
        if mode == DisplayMode::Queue {
            sleep(QUEUE_GAP).await;
        }
    }

    tracing::info!("Alert queue worker stopped");
}

/// Milliseconds for the UI, saturating for timeouts beyond `u64::MAX` ms.
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

async fn expire_after(timeout: Duration) {
    if timeout.is_zero() {
        std::future::pending::<()>().await;
    } else {
        sleep(timeout).await;
    }
}

#[cfg(test)]
mod tests;
