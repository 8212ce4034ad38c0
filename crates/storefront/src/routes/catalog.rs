//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mirror_core::ProductId;

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: u64,
    pub price_display: String,
    pub currency: String,
    pub image_url: String,
    pub description: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price.amount_minor(),
            price_display: product.price.display(),
            currency: product.price.currency_code().to_string(),
            image_url: product.image_url.clone(),
            description: product.description.clone(),
        }
    }
}

/// Product listing query.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

/// List products, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<ProductView>> {
    let products = state
        .catalog()
        .by_category(query.category.as_deref())
        .into_iter()
        .map(ProductView::from)
        .collect();
    Json(products)
}

/// Show one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    state
        .catalog()
        .get(id)
        .map(|product| Json(ProductView::from(product)))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// List categories in catalog order.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog()
            .categories()
            .into_iter()
            .map(str::to_owned)
            .collect(),
    )
}
