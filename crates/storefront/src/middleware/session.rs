//! Session middleware configuration.
//!
//! Sessions live in process memory via tower-sessions. They hold the cart,
//! the checkout in progress and the signed-in user.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use mirror_core::{Cart, Checkout, CurrencyCode};

use crate::config::StorefrontConfig;
use crate::models::session_keys;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "mirror_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Load the session cart, or an empty one in `currency`.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_cart(
    session: &Session,
    currency: CurrencyCode,
) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_else(|| Cart::new(currency)))
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Load the checkout in progress, if any.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load_checkout(
    session: &Session,
) -> Result<Option<Checkout>, tower_sessions::session::Error> {
    session.get::<Checkout>(session_keys::CHECKOUT).await
}

/// Store the checkout in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_checkout(
    session: &Session,
    checkout: &Checkout,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CHECKOUT, checkout).await
}
