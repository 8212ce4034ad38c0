//! Checkout route handlers.
//!
//! A checkout is a snapshot of the selected cart rows. It moves through
//! address, payment and review before the order is placed.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use mirror_core::{
    Checkout, CheckoutStage, OrderConfirmation, PaymentMethod, Price, ShippingAddress,
};

use crate::error::{AppError, Result};
use crate::middleware::{load_cart, load_checkout, save_cart, save_checkout};
use crate::routes::cart::LineItemView;
use crate::state::AppState;

/// An amount in minor units with its display form.
#[derive(Debug, Clone, Serialize)]
pub struct AmountView {
    pub minor: u64,
    pub display: String,
}

impl From<Price> for AmountView {
    fn from(price: Price) -> Self {
        Self {
            minor: price.amount_minor(),
            display: price.display(),
        }
    }
}

/// Checkout as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutView {
    pub stage: CheckoutStage,
    pub items: Vec<LineItemView>,
    pub subtotal: AmountView,
    pub shipping: AmountView,
    pub total: AmountView,
    pub address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
}

impl From<&Checkout> for CheckoutView {
    fn from(checkout: &Checkout) -> Self {
        let totals = checkout.totals();
        Self {
            stage: checkout.stage(),
            items: checkout.items().iter().map(LineItemView::from).collect(),
            subtotal: totals.subtotal.into(),
            shipping: totals.shipping.into(),
            total: totals.total.into(),
            address: checkout.address().cloned(),
            payment_method: checkout.payment_method(),
        }
    }
}

/// Payment method request.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub method: PaymentMethod,
}

async fn active_checkout(session: &Session) -> Result<Checkout> {
    load_checkout(session)
        .await?
        .ok_or_else(|| AppError::NotFound("checkout".to_string()))
}

async fn store(session: &Session, checkout: Checkout) -> Result<Json<CheckoutView>> {
    save_checkout(session, &checkout).await?;
    Ok(Json(CheckoutView::from(&checkout)))
}

/// Start a checkout from the selected cart rows.
///
/// Replaces any checkout already in progress.
#[instrument(skip(state, session))]
pub async fn begin(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<CheckoutView>)> {
    let cart = load_cart(&session, state.config().currency).await?;
    let checkout = Checkout::begin(&cart, state.config().shipping_fee_minor)?;

    tracing::info!(lines = checkout.items().len(), "checkout started");
    let view = store(&session, checkout).await?;
    Ok((StatusCode::CREATED, view))
}

/// Show the checkout in progress.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CheckoutView>> {
    let checkout = active_checkout(&session).await?;
    Ok(Json(CheckoutView::from(&checkout)))
}

/// Set the shipping address.
#[instrument(skip_all)]
pub async fn address(
    session: Session,
    Json(address): Json<ShippingAddress>,
) -> Result<Json<CheckoutView>> {
    let checkout = active_checkout(&session).await?.with_address(address)?;
    store(&session, checkout).await
}

/// Choose the payment method.
#[instrument(skip(session))]
pub async fn payment(
    session: Session,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<CheckoutView>> {
    let checkout = active_checkout(&session).await?.with_payment(request.method)?;
    store(&session, checkout).await
}

/// Place the order.
///
/// The ordered rows are removed from the session cart; rows left out of the
/// checkout stay. The confirmed checkout is kept so repeated placement is
/// rejected.
#[instrument(skip(state, session))]
pub async fn place(
    State(state): State<AppState>,
    session: Session,
) -> Result<(StatusCode, Json<OrderConfirmation>)> {
    let (confirmed, confirmation) = active_checkout(&session).await?.place_order()?;

    let cart = confirmation.product_ids().fold(
        load_cart(&session, state.config().currency).await?,
        mirror_core::Cart::remove_item,
    );
    save_cart(&session, &cart).await?;
    save_checkout(&session, &confirmed).await?;

    tracing::info!(
        order_number = %confirmation.order_number,
        total = %confirmation.totals.total,
        "order placed"
    );
    Ok((StatusCode::CREATED, Json(confirmation)))
}
