//! Mirror Core - Domain types and order aggregation.
//!
//! This crate holds the parts of the Mirror storefront that carry no I/O. It
//! is used by:
//! - `storefront` - HTTP API, identity collaborator and session handling
//! - `integration-tests` - End-to-end tests against a running API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! network clients, no clocks except when an order is confirmed. Every cart
//! and checkout transition takes a value and returns the next value, so the
//! caller decides where that value lives.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, addresses and statuses
//! - [`cart`] - Order aggregation over selectable line items
//! - [`checkout`] - Guarded checkout workflow and order confirmation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{Cart, CartError, LineItem, ProductRef};
pub use checkout::{Checkout, CheckoutError, CheckoutTotals, OrderConfirmation};
pub use types::*;
