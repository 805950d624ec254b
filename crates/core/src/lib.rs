//! Campus Canteen Core - Shared types library.
//!
//! This crate provides common types used across all Campus Canteen components:
//! - `datastore` - Local persisted aggregate, change notifier, session heartbeat
//! - `storefront` - Student-facing ordering services
//! - `admin` - Merchant back-office services
//! - `cli` - Command-line window controller
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, usernames,
//!   ratings, statuses, and campus locations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
