//! Domain models for storefront.
//!
//! - [`session`] - Values kept in the server-side session
//! - [`profile`] - Customer profile document

pub mod profile;
pub mod session;

pub use profile::Profile;
pub use session::{CurrentUser, keys as session_keys};
