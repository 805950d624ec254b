//! Session liveness tracking for open logical windows.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use campus_canteen_core::WindowId;

use crate::models::ActiveSession;
use crate::store::DataStore;

/// Heartbeat timing.
#[derive(Debug, Clone, Copy)]
pub struct HeartbeatConfig {
    /// How often locally owned sessions are restamped.
    pub interval: Duration,
    /// Grace period before an unrefreshed foreign record is pruned.
    /// Three missed ticks' worth by default.
    pub staleness: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            staleness: Duration::from_secs(15),
        }
    }
}

/// Maintains the best-effort liveness table of open windows.
///
/// The tracker owns the set of window ids opened in this process. On every
/// tick it rewrites the shared session collection: foreign records survive
/// only while fresh, and every locally owned id gets a brand-new record
/// stamped `now`. The wholesale rewrite guarantees at most one record per
/// window id without needing a keyed upsert.
///
/// Ticks do **not** fire the change notifier; liveness churn should not
/// trigger full view re-renders.
///
/// `Clone` is cheap; clones share the same owned-window set.
#[derive(Clone)]
pub struct SessionTracker {
    store: DataStore,
    owned: Arc<Mutex<HashSet<WindowId>>>,
    config: HeartbeatConfig,
}

impl std::fmt::Debug for SessionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTracker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionTracker {
    /// Create a tracker over the shared store with default timing.
    #[must_use]
    pub fn new(store: DataStore) -> Self {
        Self::with_config(store, HeartbeatConfig::default())
    }

    /// Create a tracker with explicit timing.
    #[must_use]
    pub fn with_config(store: DataStore, config: HeartbeatConfig) -> Self {
        Self {
            store,
            owned: Arc::new(Mutex::new(HashSet::new())),
            config,
        }
    }

    /// The tracker's timing configuration.
    #[must_use]
    pub const fn config(&self) -> HeartbeatConfig {
        self.config
    }

    /// Open a logical window: mint a fresh id and start keeping it alive.
    ///
    /// The id joins the liveness table on the next tick (or immediately via
    /// [`tick_at`](Self::tick_at)). Dropping the returned guard closes the
    /// window: the id stops being refreshed and its record is proactively
    /// removed from the shared table rather than left to age out.
    pub fn register(&self) -> WindowGuard {
        let window_id = WindowId::generate();
        self.owned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(window_id);
        debug!(%window_id, "window session opened");

        WindowGuard {
            tracker: self.clone(),
            window_id,
        }
    }

    /// Window ids owned by this process.
    #[must_use]
    pub fn owned_windows(&self) -> Vec<WindowId> {
        self.owned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    /// Run one reconciliation pass against the shared table, as of `now`.
    ///
    /// Foreign records (ids not owned here) are kept only while fresh;
    /// locally owned ids are rewritten with records stamped `now` whether or
    /// not they previously existed. Failures are logged and swallowed -
    /// liveness maintenance never surfaces an error.
    pub fn tick_at(&self, now: DateTime<Utc>) {
        let owned: HashSet<WindowId> = self
            .owned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let staleness = chrono::Duration::from_std(self.config.staleness)
            .unwrap_or_else(|_| chrono::Duration::seconds(15));

        let mut db = self.store.load();

        let mut sessions: Vec<ActiveSession> = db
            .sessions
            .iter()
            .filter(|s| !owned.contains(&s.window_id) && s.is_fresh(now, staleness))
            .cloned()
            .collect();
        sessions.extend(owned.iter().map(|&id| ActiveSession::stamped(id, now)));

        db.sessions = sessions;
        if let Err(e) = self.store.save(&db) {
            warn!(error = %e, "heartbeat tick failed to persist the session table");
        }
    }

    /// Spawn the recurring heartbeat task.
    ///
    /// The task ticks every [`HeartbeatConfig::interval`] until the returned
    /// handle is shut down. Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(&self) -> HeartbeatHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let tracker = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tracker.config.interval);
            // The first tick of a tokio interval fires immediately, which
            // registers freshly opened windows without waiting a full period.
            loop {
                tokio::select! {
                    _ = ticker.tick() => tracker.tick_at(Utc::now()),
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        HeartbeatHandle { shutdown_tx, task }
    }

    /// Close a window: stop refreshing the id and strip its record now.
    fn close(&self, window_id: WindowId) {
        self.owned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&window_id);

        let mut db = self.store.load();
        let before = db.sessions.len();
        db.sessions.retain(|s| s.window_id != window_id);
        if db.sessions.len() != before {
            if let Err(e) = self.store.save(&db) {
                warn!(error = %e, %window_id, "failed to remove closed window's session record");
            }
        }
        debug!(%window_id, "window session closed");
    }
}

/// Keeps one window id alive for as long as it exists.
///
/// Dropping the guard closes the window on every exit path.
#[must_use = "dropping a WindowGuard closes its window session"]
pub struct WindowGuard {
    tracker: SessionTracker,
    window_id: WindowId,
}

impl std::fmt::Debug for WindowGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowGuard")
            .field("window_id", &self.window_id)
            .finish()
    }
}

impl WindowGuard {
    /// The window id this guard keeps alive.
    #[must_use]
    pub const fn window_id(&self) -> WindowId {
        self.window_id
    }
}

impl Drop for WindowGuard {
    fn drop(&mut self) {
        self.tracker.close(self.window_id);
    }
}

/// Handle for the recurring heartbeat task.
///
/// Dropping the handle does **not** stop the task - call
/// [`shutdown`](Self::shutdown) for a clean stop.
#[derive(Debug)]
pub struct HeartbeatHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl HeartbeatHandle {
    /// Stop the heartbeat loop and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                warn!(error = %e, "heartbeat task ended abnormally");
            }
        }
    }
}
