//! JSON-lines output of alert updates for the headless console.

use std::io::Write;

use tokio::sync::broadcast;

use crate::alerts::AlertUpdate;

/// Write every update as one JSON line until the queue shuts down.
///
/// A lagging receiver logs the gap and keeps going. Returns the number of
/// lines written.
pub async fn forward_updates<W: Write>(
    mut updates: broadcast::Receiver<AlertUpdate>,
    mut out: W,
) -> usize {
    let mut written = 0;
    loop {
        let update = match updates.recv().await {
            Ok(update) => update,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Alert output lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };
        let line = match serde_json::to_string(&update) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to encode alert update: {e}");
                continue;
            }
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!("Alert output closed: {e}");
            break;
        }
        written += 1;
    }
    tracing::debug!(written, "Alert output stopped");
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertId, DismissReason};

    fn dismissed(reason: DismissReason) -> AlertUpdate {
        AlertUpdate::Dismissed {
            id: AlertId::new(),
            reason,
        }
    }

    #[tokio::test]
    async fn lagging_keeps_forwarding() {
        let (tx, rx) = broadcast::channel(2);
        tx.send(dismissed(DismissReason::Timeout)).unwrap();
        tx.send(dismissed(DismissReason::Action)).unwrap();
        tx.send(dismissed(DismissReason::Closed)).unwrap();
        drop(tx);

        let mut buf = Vec::new();
        assert_eq!(forward_updates(rx, &mut buf).await, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""reason":"action""#));
        assert!(lines[1].contains(r#""reason":"closed""#));
    }

    #[tokio::test]
    async fn stops_when_queue_closes() {
        let (tx, rx) = broadcast::channel::<AlertUpdate>(4);
        drop(tx);
        let mut buf = Vec::new();
        assert_eq!(forward_updates(rx, &mut buf).await, 0);
        assert!(buf.is_empty());
    }
}
