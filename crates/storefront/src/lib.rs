//! Campus Canteen Storefront library.
//!
//! The student-facing service layer: account registration and login,
//! store browsing, the order cart, checkout and order history, reviews,
//! and the campus demand forecast. Rendering is external; these services
//! are the contract a student window builds its views on.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod services;

pub use services::auth::{AuthError, AuthService};
pub use services::cart::{Cart, CartError, CartLine};
pub use services::catalog::{CatalogError, CatalogService};
pub use services::forecast::{
    DemandContext, ForecastArea, ForecastPoint, ForecastService, Horizon, fallback_points,
};
pub use services::orders::{OrderError, OrderService};
pub use services::reviews::{ReviewError, ReviewService};
