use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::time::Instant;

use super::*;
use crate::alerts::types::Continuation;

fn counter() -> (Arc<AtomicUsize>, Continuation) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    (
        count,
        Continuation::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

async fn next(rx: &mut broadcast::Receiver<AlertUpdate>) -> AlertUpdate {
    rx.recv().await.expect("update channel closed")
}

fn shown_id(update: &AlertUpdate) -> AlertId {
    match update {
        AlertUpdate::Shown { id, .. } => *id,
        other => panic!("expected Shown, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn alert_without_action_times_out() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();
    let started = Instant::now();

    let id = queue.show_alert(AlertRequest::new("Build done", "OK", Duration::from_secs(5)));

    match next(&mut updates).await {
        AlertUpdate::Shown {
            id: shown,
            message,
            action_label,
            timeout_ms,
            ..
        } => {
            assert_eq!(shown, id);
            assert_eq!(message, "Build done");
            assert_eq!(action_label, "OK");
            assert_eq!(timeout_ms, 5000);
        }
        other => panic!("unexpected {other:?}"),
    }

    assert_eq!(
        next(&mut updates).await,
        AlertUpdate::Dismissed {
            id,
            reason: DismissReason::Timeout
        }
    );
    assert_eq!(started.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn action_runs_continuation_once() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();
    let (count, continuation) = counter();

    let id = queue.show_alert(
        AlertRequest::new("Session #1 opened", "Interact", Duration::from_secs(5))
            .with_continuation(continuation),
    );
    assert_eq!(shown_id(&next(&mut updates).await), id);

    assert!(queue.trigger_action(id));
    assert!(queue.trigger_action(id));
    assert_eq!(
        next(&mut updates).await,
        AlertUpdate::Dismissed {
            id,
            reason: DismissReason::Action
        }
    );
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn action_after_timeout_is_ignored() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();
    let (count, continuation) = counter();

    let id = queue.show_alert(
        AlertRequest::dismissible("Lost session #3", Duration::from_secs(1))
            .with_continuation(continuation),
    );
    next(&mut updates).await;
    assert_eq!(
        next(&mut updates).await,
        AlertUpdate::Dismissed {
            id,
            reason: DismissReason::Timeout
        }
    );

    assert!(queue.trigger_action(id));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn overwrite_replaces_current_alert() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();
    let (count, continuation) = counter();

    let first = queue.show_alert(
        AlertRequest::new("first", "Go", Duration::from_secs(5)).with_continuation(continuation),
    );
    assert_eq!(shown_id(&next(&mut updates).await), first);

    let second = queue.show_alert(AlertRequest::dismissible("second", Duration::from_secs(5)));
    assert_eq!(
        next(&mut updates).await,
        AlertUpdate::Dismissed {
            id: first,
            reason: DismissReason::Replaced
        }
    );
    assert_eq!(shown_id(&next(&mut updates).await), second);

    queue.trigger_action(first);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn queue_mode_shows_alerts_in_order() {
    let queue = AlertQueue::start(DisplayMode::Queue);
    let mut updates = queue.subscribe();

    let first = queue.show_alert(AlertRequest::dismissible("first", Duration::from_secs(2)));
    let second = queue.show_alert(AlertRequest::dismissible("second", Duration::from_secs(2)));

    assert_eq!(shown_id(&next(&mut updates).await), first);
    assert_eq!(
        next(&mut updates).await,
        AlertUpdate::Dismissed {
            id: first,
            reason: DismissReason::Timeout
        }
    );
    assert_eq!(shown_id(&next(&mut updates).await), second);
}

#[tokio::test(start_paused = true)]
async fn close_dismisses_current_alert() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();

    let id = queue.show_alert(AlertRequest::dismissible("pinned", Duration::ZERO));
    next(&mut updates).await;

    queue.close().await;
    assert_eq!(
        next(&mut updates).await,
        AlertUpdate::Dismissed {
            id,
            reason: DismissReason::Closed
        }
    );
}

#[tokio::test]
async fn about_dialog_is_broadcast() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();

    queue.show_dialog(DialogId::About);
    match next(&mut updates).await {
        AlertUpdate::Dialog { dialog, about } => {
            assert_eq!(dialog, DialogId::About);
            assert_eq!(about.version, env!("CARGO_PKG_VERSION"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn timeout_millis_saturates() {
    assert_eq!(timeout_millis(Duration::from_secs(5)), 5000);
    assert_eq!(timeout_millis(Duration::ZERO), 0);
    assert_eq!(timeout_millis(Duration::from_secs(u64::MAX / 100)), u64::MAX);
}

#[tokio::test(start_paused = true)]
async fn huge_notification_timeout_is_reported_saturated() {
    let queue = AlertQueue::start(DisplayMode::Overwrite);
    let mut updates = queue.subscribe();

    queue.show_alert(AlertRequest::new(
        "Implant generated",
        "Dismiss",
        Duration::from_secs(u64::MAX / 100),
    ));

    match next(&mut updates).await {
        AlertUpdate::Shown { timeout_ms, .. } => assert_eq!(timeout_ms, u64::MAX),
        other => panic!("unexpected {other:?}"),
    }
    queue.close().await;
}
