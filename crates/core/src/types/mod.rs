//! Core types for CrossCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod platform;
pub mod request;
pub mod status;

pub use id::*;
pub use money::{CurrencyCode, Money};
pub use platform::EcommercePlatform;
pub use request::{Address, Customer, PurchaseRequest, RequestItem, SubRequest};
pub use status::*;
