//! Campus Canteen Admin library.
//!
//! The merchant back-office service layer: store profile lifecycle, menu
//! management, order fulfillment, sales analytics, and AI-assisted advice.
//! Rendering is external; these services are the contract a merchant
//! window builds its views on.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod services;

pub use services::advice::{AdviceService, MerchantAdvice};
pub use services::analytics::{HourlyBucket, SalesSummary};
pub use services::menu::{MenuError, MenuService};
pub use services::orders::{MerchantOrderService, OrderFilter, MerchantOrderError};
pub use services::profile::{ProfileError, StoreProfileService};
