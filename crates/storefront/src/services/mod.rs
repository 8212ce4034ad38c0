//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Account registration, sign-in, password reset, sign-out
//! - `profile` - Reading and writing the customer profile document
//! - `validation` - Form checks that run before any identity store call

pub mod auth;
pub mod profile;
pub mod validation;

pub use auth::{AccountService, AuthError};
pub use profile::{ProfileError, ProfileService};
pub use validation::ValidationError;
