//! Core types for Campus Canteen.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod location;
pub mod price;
pub mod rating;
pub mod status;
pub mod username;

pub use id::*;
pub use location::CampusLocation;
pub use price::Price;
pub use rating::{Rating, RatingError};
pub use status::OrderStatus;
pub use username::{Username, UsernameError};
