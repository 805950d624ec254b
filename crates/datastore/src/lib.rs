//! Campus Canteen datastore - the shared local aggregate.
//!
//! All durable state lives in one JSON blob: the [`Database`] aggregate with
//! its six collections (users, stores, dishes, orders, reviews, sessions).
//! Every mutation is a wholesale read-modify-write of that blob through a
//! [`DataStore`]; there is no partial-write API, no locking, and no
//! compare-and-swap. Two writers racing on the same blob lose the earlier
//! write (last save wins). See [`DataStore::save`].
//!
//! Components that mutate state broadcast through the [`ChangeNotifier`] so
//! mounted views can re-pull fresh state. The notifier is an in-process
//! mechanism only; separate processes converge through the persisted blob
//! and the session staleness rules instead.
//!
//! Open logical windows announce liveness through the [`SessionTracker`]
//! heartbeat, which refreshes locally owned session records and prunes
//! stale foreign ones on a fixed tick.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod backend;
mod database;
mod error;
pub mod models;
mod notifier;
mod sessions;
mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use database::Database;
pub use error::StoreError;
pub use notifier::{ChangeNotifier, Subscription};
pub use sessions::{HeartbeatConfig, HeartbeatHandle, SessionTracker, WindowGuard};
pub use store::{DEFAULT_DB_FILE, DataStore};
