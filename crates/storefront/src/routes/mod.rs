//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Health check
//!
//! # Catalog
//! GET    /catalog/products              - Product listing (?category=)
//! GET    /catalog/products/{id}         - Product detail
//! GET    /catalog/categories            - Category list
//!
//! # Cart
//! GET    /cart                          - Cart with selection totals
//! POST   /cart/items                    - Add product
//! POST   /cart/items/{id}/quantity      - Change quantity by delta
//! POST   /cart/items/{id}/toggle        - Flip row selection
//! DELETE /cart/items/{id}               - Remove row
//! POST   /cart/select-all               - Select or deselect all rows
//!
//! # Checkout
//! POST   /checkout                      - Begin from selected rows
//! GET    /checkout                      - Checkout in progress
//! POST   /checkout/address              - Set shipping address
//! POST   /checkout/payment              - Choose payment method
//! POST   /checkout/place                - Place the order
//!
//! # Auth
//! POST   /auth/register                 - Create account
//! POST   /auth/login                    - Sign in
//! POST   /auth/password-reset           - Send reset email
//! POST   /auth/logout                   - Sign out
//!
//! # Account (requires auth)
//! GET    /account/profile               - Profile
//! POST   /account/profile/complete      - First profile write
//! PATCH  /account/profile               - Update profile fields
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::index))
        .route("/products/{id}", get(catalog::show))
        .route("/categories", get(catalog::categories))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{id}", axum::routing::delete(cart::remove))
        .route("/items/{id}/quantity", post(cart::change_quantity))
        .route("/items/{id}/toggle", post(cart::toggle))
        .route("/select-all", post(cart::select_all))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::begin))
        .route("/address", post(checkout::address))
        .route("/payment", post(checkout::payment))
        .route("/place", post(checkout::place))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/password-reset", post(auth::password_reset))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(account::profile).patch(account::update_profile),
        )
        .route("/profile/complete", post(account::complete_profile))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/catalog", catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
}

/// Liveness health check.
async fn health() -> &'static str {
    "ok"
}
