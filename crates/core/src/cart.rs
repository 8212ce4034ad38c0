//! Order aggregation over selectable cart line items.
//!
//! A [`Cart`] is a plain value. Every mutating operation consumes the cart and
//! returns the updated one, so the caller (a session store, a test, a UI
//! event loop) decides where the current value lives. Derived values such as
//! the selected total are recomputed from the items on every call and never
//! cached.
//!
//! Operations addressed by [`ProductId`] are total: an id that is not in the
//! cart leaves the cart unchanged. A stale id from an old render is not a
//! caller bug worth surfacing.
//!
//! ```
//! use mirror_core::{Cart, CurrencyCode, Price, ProductId, ProductRef};
//!
//! let mirror = ProductRef {
//!     id: ProductId::new(1),
//!     title: "Oval wall mirror",
//!     price: Price::from_minor(2000, CurrencyCode::USD),
//!     image_url: None,
//! };
//!
//! let cart = Cart::new(CurrencyCode::USD)
//!     .add_product(mirror, 1)
//!     .unwrap()
//!     .change_quantity(ProductId::new(1), 1);
//!
//! assert_eq!(cart.selected_total().amount_minor(), 4000);
//! assert_eq!(cart.selected_count(), 1);
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId};

/// Errors raised where catalog data enters a cart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product is priced in a different currency than the cart.
    #[error("product is priced in {product}, but cart uses {cart}")]
    CurrencyMismatch {
        product: CurrencyCode,
        cart: CurrencyCode,
    },

    /// Requested quantity is zero or would overflow the line quantity.
    #[error("quantity must be between 1 and {max}", max = u32::MAX)]
    InvalidQuantity,

    /// The same product appears twice in a list of line items.
    #[error("product {0} appears more than once")]
    DuplicateItem(ProductId),
}

/// The fields a cart takes from a catalog product.
///
/// Anything else the catalog knows about a product (description, category,
/// stock) stays out of the cart.
#[derive(Debug, Clone, Copy)]
pub struct ProductRef<'a> {
    pub id: ProductId,
    pub title: &'a str,
    pub price: Price,
    pub image_url: Option<&'a str>,
}

/// One product row in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: ProductId,
    title: String,
    image_url: Option<String>,
    unit_price: Price,
    quantity: NonZeroU32,
    selected: bool,
}

impl LineItem {
    /// Create a selected line item.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        unit_price: Price,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image_url: None,
            unit_price,
            quantity,
            selected: true,
        }
    }

    /// Set whether the row counts toward the total.
    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Quantity, always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }
}

/// A shopping cart: an ordered collection of line items in one currency.
///
/// Deserializing goes through [`Cart::from_items`], so a stored cart with a
/// repeated product or a foreign-currency row is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CartData")]
pub struct Cart {
    currency_code: CurrencyCode,
    items: Vec<LineItem>,
}

/// Unchecked wire form of a [`Cart`].
#[derive(Deserialize)]
struct CartData {
    currency_code: CurrencyCode,
    items: Vec<LineItem>,
}

impl TryFrom<CartData> for Cart {
    type Error = CartError;

    fn try_from(data: CartData) -> Result<Self, Self::Error> {
        Self::from_items(data.currency_code, data.items)
    }
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new(currency_code: CurrencyCode) -> Self {
        Self {
            currency_code,
            items: Vec::new(),
        }
    }

    /// Build a cart from existing line items, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CurrencyMismatch` if an item is priced in another
    /// currency, or `CartError::DuplicateItem` if a product id repeats.
    pub fn from_items(
        currency_code: CurrencyCode,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Result<Self, CartError> {
        let mut cart = Self::new(currency_code);
        for item in items {
            let product = item.unit_price.currency_code();
            if product != currency_code {
                return Err(CartError::CurrencyMismatch {
                    product,
                    cart: currency_code,
                });
            }
            if cart.item(item.id).is_some() {
                return Err(CartError::DuplicateItem(item.id));
            }
            cart.items.push(item);
        }
        Ok(cart)
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across every row, selected or not.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum()
    }

    /// Whether the cart is non-empty and every row is selected.
    #[must_use]
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(LineItem::is_selected)
    }

    /// Selected rows in insertion order.
    pub fn selected_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.selected)
    }

    /// Number of selected rows. Checkout is unavailable while this is 0.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected_items().count()
    }

    /// Sum of `unit_price * quantity` over selected rows.
    ///
    /// Like [`Price::times`], the sum saturates at `u64::MAX` minor units.
    #[must_use]
    pub fn selected_total(&self) -> Price {
        let minor = self
            .selected_items()
            .map(|item| item.line_total().amount_minor())
            .fold(0_u64, u64::saturating_add);
        Price::from_minor(minor, self.currency_code)
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// A product already in the cart keeps its row and gains quantity; its
    /// selection is left as it was. A new row starts selected.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for a zero quantity or a row
    /// quantity that would overflow, and `CartError::CurrencyMismatch` if
    /// the product is priced in another currency.
    pub fn add_product(
        mut self,
        product: ProductRef<'_>,
        quantity: u32,
    ) -> Result<Self, CartError> {
        let quantity = NonZeroU32::new(quantity).ok_or(CartError::InvalidQuantity)?;
        let currency = product.price.currency_code();
        if currency != self.currency_code {
            return Err(CartError::CurrencyMismatch {
                product: currency,
                cart: self.currency_code,
            });
        }

        if let Some(existing) = self.item_mut(product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity.get())
                .ok_or(CartError::InvalidQuantity)?;
            return Ok(self);
        }

        let mut item = LineItem::new(product.id, product.title, product.price, quantity);
        item.image_url = product.image_url.map(str::to_owned);
        self.items.push(item);
        Ok(self)
    }

    /// Deselect every row if all are selected, otherwise select every row.
    #[must_use]
    pub fn toggle_select_all(mut self) -> Self {
        let select = !self.all_selected();
        for item in &mut self.items {
            item.selected = select;
        }
        self
    }

    /// Flip the selection of one row.
    #[must_use]
    pub fn toggle_item_selection(mut self, id: ProductId) -> Self {
        if let Some(item) = self.item_mut(id) {
            item.selected = !item.selected;
        }
        self
    }

    /// Add `delta` to a row's quantity.
    ///
    /// The update is rejected, leaving the quantity as it was, when the
    /// result would drop below 1 or exceed `u32::MAX`.
    #[must_use]
    pub fn change_quantity(mut self, id: ProductId, delta: i64) -> Self {
        if let Some(item) = self.item_mut(id) {
            let next = i64::from(item.quantity.get()).saturating_add(delta);
            if let Some(quantity) = u32::try_from(next).ok().and_then(NonZeroU32::new) {
                item.quantity = quantity;
            }
        }
        self
    }

    /// Remove a row entirely.
    #[must_use]
    pub fn remove_item(mut self, id: ProductId) -> Self {
        self.items.retain(|item| item.id != id);
        self
    }

    /// A copy of the cart holding only the selected rows.
    #[must_use]
    pub fn selected_only(&self) -> Self {
        Self {
            currency_code: self.currency_code,
            items: self.selected_items().cloned().collect(),
        }
    }

    fn item_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const USD: CurrencyCode = CurrencyCode::USD;

    fn line(id: i32, price: u64, quantity: u32, selected: bool) -> LineItem {
        LineItem::new(
            ProductId::new(id),
            format!("Mirror {id}"),
            Price::from_minor(price, USD),
            NonZeroU32::new(quantity).unwrap(),
        )
        .with_selected(selected)
    }

    fn cart(items: Vec<LineItem>) -> Cart {
        Cart::from_items(USD, items).unwrap()
    }

    fn mixed_cart() -> Cart {
        cart(vec![
            line(1, 2000, 1, true),
            line(2, 2000, 1, false),
            line(3, 1550, 3, true),
            line(4, 999, 2, false),
        ])
    }

    fn full_sum(cart: &Cart) -> u64 {
        cart.items()
            .iter()
            .map(|item| item.line_total().amount_minor())
            .sum()
    }

    #[test]
    fn test_worked_example() {
        let items = cart(vec![line(1, 2000, 1, true), line(2, 2000, 1, false)]);
        assert_eq!(items.selected_total().amount_minor(), 2000);

        let items = items.toggle_item_selection(ProductId::new(2));
        assert_eq!(items.selected_total().amount_minor(), 4000);

        let items = items.change_quantity(ProductId::new(1), 1);
        assert_eq!(items.item(ProductId::new(1)).unwrap().quantity(), 2);
        assert_eq!(items.selected_total().amount_minor(), 6000);
    }

    #[test]
    fn test_select_all_totals_whole_collection() {
        let items = mixed_cart();
        let expected = full_sum(&items);
        let items = items.toggle_select_all();
        assert!(items.all_selected());
        assert_eq!(items.selected_total().amount_minor(), expected);
        assert_eq!(items.selected_count(), 4);
    }

    #[test]
    fn test_toggle_select_all_twice_from_full_selection_restores_total() {
        let items = mixed_cart().toggle_select_all();
        let before = items.selected_total();
        let after = items.clone().toggle_select_all().toggle_select_all();
        assert_eq!(after.selected_total(), before);
        assert_eq!(after, items);
    }

    #[test]
    fn test_toggle_select_all_twice_from_no_selection_restores_total() {
        let items = cart(vec![line(1, 100, 1, false), line(2, 200, 2, false)]);
        let after = items.clone().toggle_select_all().toggle_select_all();
        assert_eq!(after.selected_total(), items.selected_total());
    }

    #[test]
    fn test_toggle_select_all_deselects_when_everything_selected() {
        let items = cart(vec![line(1, 100, 1, true), line(2, 200, 1, true)]);
        let items = items.toggle_select_all();
        assert_eq!(items.selected_count(), 0);
        assert_eq!(items.selected_total().amount_minor(), 0);
    }

    #[test]
    fn test_toggle_select_all_on_empty_cart_is_noop() {
        let items = Cart::new(USD).toggle_select_all();
        assert!(items.is_empty());
        assert!(!items.all_selected());
    }

    #[test]
    fn test_toggle_item_unknown_id_is_noop() {
        let items = mixed_cart();
        assert_eq!(items.clone().toggle_item_selection(ProductId::new(99)), items);
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let mut items = cart(vec![line(1, 500, 4, true)]);
        let id = ProductId::new(1);
        while items.item(id).unwrap().quantity() > 1 {
            items = items.change_quantity(id, -1);
        }
        let items = items.change_quantity(id, -1);
        assert_eq!(items.item(id).unwrap().quantity(), 1);
    }

    #[test]
    fn test_large_negative_delta_is_rejected_not_clamped() {
        let items = cart(vec![line(1, 500, 5, true)]);
        let items = items.change_quantity(ProductId::new(1), -10);
        assert_eq!(items.item(ProductId::new(1)).unwrap().quantity(), 5);
    }

    #[test]
    fn test_change_quantity_accepts_any_delta() {
        let items = cart(vec![line(1, 500, 5, true)]);
        let items = items.change_quantity(ProductId::new(1), -4);
        assert_eq!(items.item(ProductId::new(1)).unwrap().quantity(), 1);
        let items = items.change_quantity(ProductId::new(1), 9);
        assert_eq!(items.item(ProductId::new(1)).unwrap().quantity(), 10);
    }

    #[test]
    fn test_change_quantity_rejects_overflow() {
        let items = cart(vec![line(1, 1, u32::MAX, true)]);
        let items = items.change_quantity(ProductId::new(1), 1);
        assert_eq!(items.item(ProductId::new(1)).unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn test_change_quantity_unknown_id_is_noop() {
        let items = mixed_cart();
        assert_eq!(items.clone().change_quantity(ProductId::new(42), 1), items);
    }

    #[test]
    fn test_remove_twice_is_noop_second_time() {
        let once = mixed_cart().remove_item(ProductId::new(3));
        assert_eq!(once.len(), 3);
        assert!(once.item(ProductId::new(3)).is_none());
        let twice = once.clone().remove_item(ProductId::new(3));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_remove_preserves_order() {
        let items = mixed_cart().remove_item(ProductId::new(2));
        let ids: Vec<i32> = items.items().iter().map(|i| i.id().as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_empty_cart_totals() {
        let items = Cart::new(USD);
        assert_eq!(items.selected_count(), 0);
        assert_eq!(items.selected_total(), Price::zero(USD));
    }

    #[test]
    fn test_selected_total_is_stable_across_calls() {
        let items = mixed_cart();
        let first = items.selected_total();
        for _ in 0..100 {
            assert_eq!(items.selected_total(), first);
        }
        assert_eq!(first.amount_minor(), 2000 + 1550 * 3);
    }

    #[test]
    fn test_add_product_appends_selected_row() {
        let product = ProductRef {
            id: ProductId::new(7),
            title: "Floor mirror",
            price: Price::from_minor(12_500, USD),
            image_url: Some("/img/floor.jpg"),
        };
        let items = Cart::new(USD).add_product(product, 2).unwrap();
        let row = items.item(ProductId::new(7)).unwrap();
        assert!(row.is_selected());
        assert_eq!(row.quantity(), 2);
        assert_eq!(row.title(), "Floor mirror");
        assert_eq!(row.image_url(), Some("/img/floor.jpg"));
    }

    #[test]
    fn test_add_same_product_merges_rows() {
        let product = ProductRef {
            id: ProductId::new(7),
            title: "Floor mirror",
            price: Price::from_minor(12_500, USD),
            image_url: None,
        };
        let items = Cart::new(USD)
            .add_product(product, 1)
            .unwrap()
            .toggle_item_selection(ProductId::new(7))
            .add_product(product, 2)
            .unwrap();
        assert_eq!(items.len(), 1);
        let row = items.item(ProductId::new(7)).unwrap();
        assert_eq!(row.quantity(), 3);
        assert!(!row.is_selected());
    }

    #[test]
    fn test_add_product_rejects_zero_quantity_and_foreign_currency() {
        let product = ProductRef {
            id: ProductId::new(1),
            title: "Hand mirror",
            price: Price::from_minor(500, CurrencyCode::EUR),
            image_url: None,
        };
        assert_eq!(
            Cart::new(USD).add_product(product, 1),
            Err(CartError::CurrencyMismatch {
                product: CurrencyCode::EUR,
                cart: USD,
            })
        );
        assert_eq!(
            Cart::new(CurrencyCode::EUR).add_product(product, 0),
            Err(CartError::InvalidQuantity)
        );
    }

    #[test]
    fn test_from_items_rejects_duplicates() {
        let result = Cart::from_items(USD, vec![line(1, 100, 1, true), line(1, 100, 1, true)]);
        assert_eq!(result, Err(CartError::DuplicateItem(ProductId::new(1))));
    }

    #[test]
    fn test_total_quantity_counts_all_rows() {
        assert_eq!(mixed_cart().total_quantity(), 7);
    }

    fn stored_row(id: i32, currency: &str, quantity: u32) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Mirror",
            "image_url": null,
            "unit_price": {"amount_minor": 100, "currency_code": currency},
            "quantity": quantity,
            "selected": true
        })
    }

    fn load(items: Vec<serde_json::Value>) -> Result<Cart, serde_json::Error> {
        serde_json::from_value(serde_json::json!({"currency_code": "USD", "items": items}))
    }

    #[test]
    fn test_zero_quantity_rejected_on_deserialize() {
        assert!(load(vec![stored_row(1, "USD", 0)]).is_err());
    }

    #[test]
    fn test_deserialize_checks_duplicates_and_currency() {
        let err = load(vec![stored_row(1, "USD", 1), stored_row(1, "USD", 2)]).unwrap_err();
        assert!(err.to_string().contains("appears more than once"));

        let err = load(vec![stored_row(1, "EUR", 1)]).unwrap_err();
        assert!(err.to_string().contains("cart uses USD"));

        let stored = mixed_cart();
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(serde_json::from_value::<Cart>(json).unwrap(), stored);
    }

    #[test]
    fn test_selected_total_saturates() {
        let items = cart(vec![line(1, u64::MAX, 1, true), line(2, 10, 1, true)]);
        assert_eq!(items.selected_total().amount_minor(), u64::MAX);
    }
}
