//! Alert builders for each event kind.
//!
//! Builders never fail: an event missing its nested payload still yields an
//! alert, with the missing detail left out of the message.

use std::sync::Arc;
use std::time::Duration;

use console_events::{Client, Job, Notification, Session};

use super::desktop::SystemNotifier;
use super::queue::Presenter;
use super::types::{AlertId, AlertRequest, Continuation};
use crate::navigation::Navigator;

const INTERACT_LABEL: &str = "Interact";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Joined,
    Left,
}

impl PlayerAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Joined => "joined",
            Self::Left => "left",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlertSettings {
    pub duration: Duration,
    pub notification_title: String,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            notification_title: "Operator Console".into(),
        }
    }
}

pub fn session_connected_message(session: Option<&Session>) -> String {
    match session {
        Some(s) => format!("Session #{} opened", s.id),
        None => "Session opened".into(),
    }
}

/// "Interact" navigates to the session's detail view.
pub fn session_connected_alert(
    session: Option<&Session>,
    navigator: Arc<dyn Navigator>,
    duration: Duration,
) -> AlertRequest {
    let request = AlertRequest::new(session_connected_message(session), INTERACT_LABEL, duration);
    match session {
        Some(s) => {
            let route = vec!["sessions".to_string(), s.id.to_string()];
            request.with_continuation(Continuation::new(move || navigator.navigate(&route)))
        }
        None => request,
    }
}

pub fn session_disconnected_alert(session: Option<&Session>, duration: Duration) -> AlertRequest {
    let message = match session {
        Some(s) => format!("Lost session #{}", s.id),
        None => "Lost session".into(),
    };
    AlertRequest::dismissible(message, duration)
}

pub fn player_alert(action: PlayerAction, client: Option<&Client>, duration: Duration) -> AlertRequest {
    let name = client
        .and_then(|c| c.operator.as_ref())
        .map(|o| o.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("An operator");
    AlertRequest::dismissible(format!("{name} has {} the game!", action.as_str()), duration)
}

pub fn job_stopped_alert(job: Option<&Job>, duration: Duration) -> AlertRequest {
    let message = match job {
        Some(j) => format!("Job #{} ({}/{}) has stopped.", j.id, j.protocol, j.name),
        None => "Job has stopped.".into(),
    };
    AlertRequest::dismissible(message, duration)
}

/// Label, timeout and callback all come from the notification itself.
pub fn notification_alert(notification: &Notification) -> AlertRequest {
    let request = AlertRequest::new(
        notification.message.clone(),
        notification.acknowledge_label.clone(),
        Duration::from_secs(notification.timeout_seconds),
    );
    match notification.on_acknowledge.clone() {
        Some(callback) => request.with_continuation(Continuation::new(move || callback.call())),
        None => request,
    }
}

/// Builds alerts and hands them to the presentation services.
pub struct AlertHandlers {
    presenter: Arc<dyn Presenter>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn SystemNotifier>,
    settings: AlertSettings,
}

impl AlertHandlers {
    pub fn new(
        presenter: Arc<dyn Presenter>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn SystemNotifier>,
        settings: AlertSettings,
    ) -> Self {
        Self {
            presenter,
            navigator,
            notifier,
            settings,
        }
    }

    pub fn session_connected(&self, session: Option<&Session>) -> AlertId {
        let request =
            session_connected_alert(session, self.navigator.clone(), self.settings.duration);
        let body = request.message.clone();
        let id = self.presenter.show_alert(request);

        if let Err(e) = self.notifier.notify(&self.settings.notification_title, &body) {
            tracing::debug!("Desktop notification skipped: {e}");
        }
        id
    }

    pub fn session_disconnected(&self, session: Option<&Session>) -> AlertId {
        self.presenter
            .show_alert(session_disconnected_alert(session, self.settings.duration))
    }

    pub fn player(&self, action: PlayerAction, client: Option<&Client>) -> AlertId {
        self.presenter
            .show_alert(player_alert(action, client, self.settings.duration))
    }

    pub fn job_stopped(&self, job: Option<&Job>) -> AlertId {
        self.presenter
            .show_alert(job_stopped_alert(job, self.settings.duration))
    }

    pub fn notification(&self, notification: &Notification) -> AlertId {
        self.presenter.show_alert(notification_alert(notification))
    }
}

#[cfg(test)]
mod tests;
