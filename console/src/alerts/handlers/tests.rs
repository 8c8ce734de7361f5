use console_events::{AckCallback, Operator};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::test_support::{RecordingNavigator, RecordingNotifier, RecordingPresenter};

const FIVE: Duration = Duration::from_secs(5);

fn session(id: u32) -> Session {
    Session {
        id,
        ..Session::default()
    }
}

#[test]
fn session_connected_navigates_on_interact() {
    let navigator = Arc::new(RecordingNavigator::default());
    let request = session_connected_alert(Some(&session(42)), navigator.clone(), FIVE);

    assert_eq!(request.message, "Session #42 opened");
    assert_eq!(request.action_label, "Interact");
    assert_eq!(request.timeout, FIVE);

    request.on_action.expect("continuation").run();
    assert_eq!(
        navigator.routes(),
        vec![vec!["sessions".to_string(), "42".to_string()]]
    );
}

#[test]
fn session_connected_without_session_has_no_continuation() {
    let navigator = Arc::new(RecordingNavigator::default());
    let request = session_connected_alert(None, navigator, FIVE);
    assert_eq!(request.message, "Session opened");
    assert!(request.on_action.is_none());
}

#[test]
fn session_disconnected_is_dismiss_only() {
    let request = session_disconnected_alert(Some(&session(9)), FIVE);
    assert_eq!(request.message, "Lost session #9");
    assert_eq!(request.action_label, "Dismiss");
    assert!(request.on_action.is_none());

    assert_eq!(session_disconnected_alert(None, FIVE).message, "Lost session");
}

#[test]
fn player_messages() {
    let client = Client {
        id: 1,
        operator: Some(Operator {
            name: "moloch".into(),
        }),
    };
    assert_eq!(
        player_alert(PlayerAction::Joined, Some(&client), FIVE).message,
        "moloch has joined the game!"
    );
    assert_eq!(
        player_alert(PlayerAction::Left, Some(&client), FIVE).message,
        "moloch has left the game!"
    );

    let anonymous = Client::default();
    assert_eq!(
        player_alert(PlayerAction::Left, Some(&anonymous), FIVE).message,
        "An operator has left the game!"
    );
    assert_eq!(
        player_alert(PlayerAction::Joined, None, FIVE).message,
        "An operator has joined the game!"
    );
}

#[test]
fn job_stopped_message() {
    let job = Job {
        id: 7,
        protocol: "mtls".into(),
        name: "foo".into(),
        port: 8888,
    };
    let request = job_stopped_alert(Some(&job), FIVE);
    assert_eq!(request.message, "Job #7 (mtls/foo) has stopped.");
    assert!(request.on_action.is_none());
    assert_eq!(job_stopped_alert(None, FIVE).message, "Job has stopped.");
}

#[test]
fn notification_without_callback() {
    let mut notification = Notification::new("Profile saved");
    notification.acknowledge_label = "Ok".into();
    notification.timeout_seconds = 5;

    let request = notification_alert(&notification);
    assert_eq!(request.message, "Profile saved");
    assert_eq!(request.action_label, "Ok");
    assert_eq!(request.timeout, Duration::from_millis(5000));
    assert!(request.on_action.is_none());
}

#[test]
fn notification_callback_becomes_continuation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let mut notification = Notification::new("Implant built");
    notification.on_acknowledge = Some(AckCallback::new(move || {
        c.fetch_add(1, Ordering::SeqCst);
    }));

    let request = notification_alert(&notification);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    request.on_action.expect("continuation").run();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

fn handlers(notifier: RecordingNotifier) -> (AlertHandlers, Arc<RecordingPresenter>, Arc<RecordingNotifier>) {
    let presenter = Arc::new(RecordingPresenter::default());
    let notifier = Arc::new(notifier);
    let handlers = AlertHandlers::new(
        presenter.clone(),
        Arc::new(RecordingNavigator::default()),
        notifier.clone(),
        AlertSettings {
            duration: Duration::from_secs(3),
            notification_title: "Ops".into(),
        },
    );
    (handlers, presenter, notifier)
}

#[test]
fn session_connected_mirrors_to_desktop() {
    let (handlers, presenter, notifier) = handlers(RecordingNotifier::default());
    handlers.session_connected(Some(&session(5)));

    assert_eq!(presenter.messages(), vec!["Session #5 opened"]);
    assert_eq!(
        notifier.sent(),
        vec![("Ops".to_string(), "Session #5 opened".to_string())]
    );
    presenter.with_alert(0, |r| assert_eq!(r.timeout, Duration::from_secs(3)));
}

#[test]
fn desktop_failure_does_not_affect_alert() {
    let (handlers, presenter, notifier) = handlers(RecordingNotifier::failing());
    handlers.session_connected(Some(&session(6)));

    assert_eq!(presenter.messages(), vec!["Session #6 opened"]);
    assert!(notifier.sent().is_empty());
    assert!(presenter.take_continuation(0).is_some());
}
