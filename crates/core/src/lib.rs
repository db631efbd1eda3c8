//! CrossCart Core - Shared domain types.
//!
//! This crate provides the common types used across CrossCart components:
//! - `engine` - Quotation and refund workflow engine
//! - `integration-tests` - Backend integration tests
//!
//! # Architecture
//!
//! The core crate contains only types and small helper methods - no I/O,
//! no HTTP clients, no stateful services. This keeps it lightweight and
//! allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, lifecycle statuses, and the purchase
//!   request entity model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
