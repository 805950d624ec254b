//! Record types stored in the [`Database`](crate::Database) aggregate.
//!
//! All cross-references between records (`store_id`, `buyer_id`, ...) are
//! weak: nothing enforces them on write, and readers must tolerate dangling
//! references to soft-deleted or missing records.

pub mod dish;
pub mod order;
pub mod review;
pub mod session;
pub mod store;
pub mod user;

pub use dish::Dish;
pub use order::{Order, OrderItem};
pub use review::Review;
pub use session::ActiveSession;
pub use store::Store;
pub use user::User;
