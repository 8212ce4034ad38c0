//! Cart route handlers.
//!
//! The cart lives in the session. Each handler loads it, applies one
//! operation and stores the result.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use mirror_core::{Cart, LineItem, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::{load_cart, save_cart};
use crate::state::AppState;

/// Cart row as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct LineItemView {
    pub product_id: ProductId,
    pub title: String,
    pub image_url: Option<String>,
    pub unit_price: u64,
    pub quantity: u32,
    pub selected: bool,
    pub line_total: u64,
    pub line_total_display: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        let line_total = item.line_total();
        Self {
            product_id: item.id(),
            title: item.title().to_string(),
            image_url: item.image_url().map(str::to_owned),
            unit_price: item.unit_price().amount_minor(),
            quantity: item.quantity(),
            selected: item.is_selected(),
            line_total: line_total.amount_minor(),
            line_total_display: line_total.display(),
        }
    }
}

/// Cart as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<LineItemView>,
    pub currency: String,
    pub total_quantity: u64,
    pub selected_count: usize,
    pub all_selected: bool,
    pub selected_total: u64,
    pub selected_total_display: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let total = cart.selected_total();
        Self {
            items: cart.items().iter().map(LineItemView::from).collect(),
            currency: cart.currency_code().to_string(),
            total_quantity: cart.total_quantity(),
            selected_count: cart.selected_count(),
            all_selected: cart.all_selected(),
            selected_total: total.amount_minor(),
            selected_total_display: total.display(),
        }
    }
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Quantity change request.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub delta: i64,
}

async fn current_cart(state: &AppState, session: &Session) -> Result<Cart> {
    Ok(load_cart(session, state.config().currency).await?)
}

async fn store(session: &Session, cart: Cart) -> Result<Json<CartView>> {
    save_cart(session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Show the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = current_cart(&state, &session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a catalog product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let cart = current_cart(&state, &session)
        .await?
        .add_product(product.line_source(), request.quantity.unwrap_or(1))?;

    tracing::info!(product_id = %product.id, lines = cart.len(), "added to cart");
    store(&session, cart).await
}

/// Change a row's quantity by a signed delta.
///
/// A change that would take the quantity below 1, or a row that is not in
/// the cart, leaves the cart unchanged.
#[instrument(skip(state, session))]
pub async fn change_quantity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
    Json(request): Json<QuantityRequest>,
) -> Result<Json<CartView>> {
    let cart = current_cart(&state, &session).await?;
    store(&session, cart.change_quantity(id, request.delta)).await
}

/// Flip one row's selection. An id not in the cart is a no-op.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let cart = current_cart(&state, &session).await?;
    store(&session, cart.toggle_item_selection(id)).await
}

/// Remove a row. Removing an absent row is a no-op.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let cart = current_cart(&state, &session).await?;
    store(&session, cart.remove_item(id)).await
}

/// Select every row, or deselect all when every row is already selected.
#[instrument(skip(state, session))]
pub async fn select_all(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartView>> {
    let cart = current_cart(&state, &session).await?;
    store(&session, cart.toggle_select_all()).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use mirror_core::{CurrencyCode, Price};

    use super::*;

    #[test]
    fn test_cart_view_reports_selected_totals() {
        let usd = CurrencyCode::USD;
        let cart = Cart::from_items(
            usd,
            vec![
                LineItem::new(
                    ProductId::new(1),
                    "Oval Wall Mirror",
                    Price::from_minor(2000, usd),
                    NonZeroU32::new(3).unwrap(),
                ),
                LineItem::new(
                    ProductId::new(2),
                    "Sunburst Mirror",
                    Price::from_minor(4500, usd),
                    NonZeroU32::new(1).unwrap(),
                )
                .with_selected(false),
            ],
        )
        .unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.total_quantity, 4);
        assert_eq!(view.selected_count, 1);
        assert!(!view.all_selected);
        assert_eq!(view.selected_total, 6000);
        assert_eq!(view.selected_total_display, "$60.00");
        assert_eq!(view.items[0].line_total, 6000);
        assert_eq!(view.currency, "USD");
    }
}
