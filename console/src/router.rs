//! Stream router: fans the event feed out to filtered handlers.
//!
//! Each registration owns one receiver and one task, so events within a
//! category reach a handler in arrival order. Registrations are released
//! through cancellation tokens held in a [`SubscriptionSet`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use console_events::{Category, Event, EventError, EventSource};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Identifies one registration within its [`SubscriptionSet`].
pub type SubscriptionId = u64;

struct Subscription {
    label: String,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owned collection of running subscriptions.
///
/// Every subscription is cancelled when the set is dropped. Cancelled tasks
/// are kept until [`SubscriptionSet::join_released`] waits for them.
#[derive(Default)]
pub struct SubscriptionSet {
    next_id: SubscriptionId,
    active: BTreeMap<SubscriptionId, Subscription>,
    released: Vec<JoinHandle<()>>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` with a fresh cancellation token and track it.
    pub fn spawn<F, Fut>(&mut self, label: impl Into<String>, task: F) -> SubscriptionId
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let handle = tokio::spawn(task(token.clone()));

        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(
            id,
            Subscription {
                label: label.into(),
                token,
                handle,
            },
        );
        id
    }

    /// Cancel one subscription. Returns false if it was already released.
    pub fn cancel(&mut self, id: SubscriptionId) -> bool {
        match self.active.remove(&id) {
            Some(sub) => {
                sub.token.cancel();
                tracing::debug!(label = %sub.label, "Subscription cancelled");
                self.released.push(sub.handle);
                true
            }
            None => false,
        }
    }

    /// Cancel everything. Safe to call repeatedly; returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let released = self.active.len();
        for (_, sub) in std::mem::take(&mut self.active) {
            sub.token.cancel();
            self.released.push(sub.handle);
        }
        released
    }

    /// Wait for every cancelled task to exit. Returns how many were joined.
    pub async fn join_released(&mut self) -> usize {
        let handles = std::mem::take(&mut self.released);
        let joined = handles.len();
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("Subscription task ended abnormally: {e}");
            }
        }
        joined
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

pub struct StreamRouter {
    source: Arc<dyn EventSource>,
    subscriptions: SubscriptionSet,
}

impl StreamRouter {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self {
            source,
            subscriptions: SubscriptionSet::new(),
        }
    }

    /// Invoke `handler` once for every event in `category` accepted by
    /// `predicate`, in arrival order.
    ///
    /// The receiver is opened before this returns, so any event published
    /// afterwards is seen. Must be called from within a tokio runtime.
    pub fn subscribe<P, H>(&mut self, category: Category, predicate: P, handler: H) -> SubscriptionId
    where
        P: Fn(&Event) -> bool + Send + 'static,
        H: Fn(&Event) + Send + 'static,
    {
        let mut rx = self.source.subscribe(category);
        self.subscriptions
            .spawn(format!("events:{category}"), move |token| async move {
                loop {
                    let received = tokio::select! {
                        biased;
                        _ = token.cancelled() => break,
                        received = rx.recv() => received,
                    };
                    match received {
                        Ok(event) => {
                            if token.is_cancelled() {
                                break;
                            }
                            if predicate(&event) {
                                handler(&event);
                            }
                        }
                        Err(EventError::Lagged(skipped)) => {
                            tracing::warn!(%category, skipped, "Event subscription lagged");
                        }
                        Err(EventError::Closed) => {
                            tracing::info!(%category, "Event source closed");
                            break;
                        }
                        Err(e) => {
                            tracing::warn!(%category, "Event subscription error: {e}");
                        }
                    }
                }
                tracing::debug!(%category, "Event subscription released");
            })
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.cancel(id)
    }

    /// Release every subscription created by this router.
    pub fn unsubscribe_all(&mut self) -> usize {
        self.subscriptions.cancel_all()
    }

    pub fn active(&self) -> usize {
        self.subscriptions.len()
    }

    /// Wait until every released subscription task has exited.
    pub async fn join_released(&mut self) -> usize {
        self.subscriptions.join_released().await
    }
}
