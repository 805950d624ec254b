//! In-process change notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// A registered change handler.
type Handler = Arc<dyn Fn() + Send + Sync>;

struct NotifierInner {
    /// Handlers in registration order, each tagged with its subscription id.
    handlers: Mutex<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
}

/// Broadcasts "state changed" to everything currently listening.
///
/// The signal carries no payload: handlers are expected to re-load the
/// aggregate themselves and re-derive whatever they present. Handlers run
/// synchronously, in registration order, on the notifying caller's stack.
///
/// The notifier reaches listeners within this process only. Separate
/// processes sharing the same blob converge through the persisted state and
/// the session staleness rules, never through this mechanism.
///
/// `Clone` is cheap; clones share the same subscriber list.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<NotifierInner>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier").finish_non_exhaustive()
    }
}

impl ChangeNotifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                handlers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a handler invoked on every [`notify`](Self::notify).
    ///
    /// The handler stays registered until the returned [`Subscription`] is
    /// dropped. Views must drop their subscription on teardown, on every
    /// exit path, so handlers never fire for views that no longer exist.
    #[must_use = "the handler is unsubscribed when the Subscription is dropped"]
    pub fn subscribe(&self, handler: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(handler)));

        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Broadcast a zero-payload change signal to all current subscribers.
    ///
    /// Handlers are invoked outside the subscriber lock, so a handler may
    /// itself subscribe or drop subscriptions; such changes take effect from
    /// the next `notify` call.
    pub fn notify(&self) {
        let handlers: Vec<Handler> = self
            .inner
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in handlers {
            handler();
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Scoped handle to a registered handler; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    id: u64,
    inner: Weak<NotifierInner>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .handlers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}
