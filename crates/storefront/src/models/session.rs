//! Session-related types.
//!
//! Types stored in the session for authentication and shopping state.

use serde::{Deserialize, Serialize};

use mirror_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account ID issued by the identity store.
    pub id: UserId,
    /// Account email address.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current signed-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart value.
    pub const CART: &str = "cart";

    /// Key for the checkout in progress.
    pub const CHECKOUT: &str = "checkout";
}
