//! Checkout workflow.
//!
//! A [`Checkout`] snapshots the selected rows of a cart and walks through
//! address, payment and review before an order is placed:
//!
//! ```text
//! begin ──▶ Address ──with_address──▶ Payment ──with_payment──▶ Review ──place_order──▶ Confirmed
//!                                       │  ▲                     │  ▲
//!                                       └──┘ with_address        └──┘ with_address / with_payment
//! ```
//!
//! Placing an order produces an [`OrderConfirmation`]. Nothing is submitted
//! or persisted here; the confirmation is what the buyer is shown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};
use crate::types::{
    AddressError, CheckoutStage, CurrencyCode, PaymentMethod, Price, ProductId, ShippingAddress,
};

/// Errors from checkout transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no selected rows.
    #[error("select at least one item to check out")]
    NothingSelected,

    /// The shipping address is incomplete.
    #[error("invalid shipping address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The action is not allowed at the current stage.
    #[error("cannot {action} while checkout is at the {from} stage")]
    InvalidTransition {
        from: CheckoutStage,
        action: &'static str,
    },
}

/// Money breakdown of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

/// A checkout in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    stage: CheckoutStage,
    items: Cart,
    shipping_fee: Price,
    address: Option<ShippingAddress>,
    payment_method: Option<PaymentMethod>,
}

/// What the buyer sees once an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub items: Vec<LineItem>,
    pub totals: CheckoutTotals,
    pub address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Products included in the order.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().map(LineItem::id)
    }
}

impl Checkout {
    /// Start a checkout for the selected rows of `cart`.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NothingSelected` if no row is selected.
    pub fn begin(cart: &Cart, shipping_fee_minor: u64) -> Result<Self, CheckoutError> {
        if cart.selected_count() == 0 {
            return Err(CheckoutError::NothingSelected);
        }

        Ok(Self {
            stage: CheckoutStage::Address,
            items: cart.selected_only(),
            shipping_fee: Price::from_minor(shipping_fee_minor, cart.currency_code()),
            address: None,
            payment_method: None,
        })
    }

    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Rows being checked out.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.items.items()
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.items.currency_code()
    }

    #[must_use]
    pub const fn address(&self) -> Option<&ShippingAddress> {
        self.address.as_ref()
    }

    #[must_use]
    pub const fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Subtotal of the snapshot, shipping fee and their sum.
    ///
    /// The sum saturates at `u64::MAX` minor units, as the subtotal does.
    #[must_use]
    pub fn totals(&self) -> CheckoutTotals {
        let subtotal = self.items.selected_total();
        let shipping = self.shipping_fee;
        let total = Price::from_minor(
            subtotal
                .amount_minor()
                .saturating_add(shipping.amount_minor()),
            self.currency_code(),
        );
        CheckoutTotals {
            subtotal,
            shipping,
            total,
        }
    }

    /// Set or replace the shipping address.
    ///
    /// Moves an `Address` checkout to `Payment`; at later stages the address
    /// is replaced and the stage kept.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidAddress` for an incomplete address and
    /// `CheckoutError::InvalidTransition` once the order is placed.
    pub fn with_address(mut self, address: ShippingAddress) -> Result<Self, CheckoutError> {
        if self.stage == CheckoutStage::Confirmed {
            return Err(self.invalid("change the address"));
        }
        address.validate()?;
        if self.stage == CheckoutStage::Address {
            self.stage = CheckoutStage::Payment;
        }
        self.address = Some(address);
        Ok(self)
    }

    /// Set or replace the payment method.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` before an address is set
    /// or once the order is placed.
    pub fn with_payment(mut self, method: PaymentMethod) -> Result<Self, CheckoutError> {
        match self.stage {
            CheckoutStage::Payment | CheckoutStage::Review => {
                self.stage = CheckoutStage::Review;
                self.payment_method = Some(method);
                Ok(self)
            }
            CheckoutStage::Address | CheckoutStage::Confirmed => {
                Err(self.invalid("choose a payment method"))
            }
        }
    }

    /// Place the order.
    ///
    /// Returns the confirmed checkout together with the confirmation.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` unless the checkout is at
    /// the `Review` stage.
    pub fn place_order(mut self) -> Result<(Self, OrderConfirmation), CheckoutError> {
        let (Some(address), Some(payment_method), CheckoutStage::Review) =
            (self.address.clone(), self.payment_method, self.stage)
        else {
            return Err(self.invalid("place the order"));
        };

        let confirmation = OrderConfirmation {
            order_number: Uuid::new_v4(),
            items: self.items.items().to_vec(),
            totals: self.totals(),
            address,
            payment_method,
            placed_at: Utc::now(),
        };
        self.stage = CheckoutStage::Confirmed;
        Ok((self, confirmation))
    }

    const fn invalid(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            from: self.stage,
            action,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::types::address::sample_address;

    fn cart() -> Cart {
        let usd = CurrencyCode::USD;
        Cart::from_items(
            usd,
            vec![
                LineItem::new(
                    ProductId::new(1),
                    "Round mirror",
                    Price::from_minor(2000, usd),
                    NonZeroU32::new(2).unwrap(),
                ),
                LineItem::new(
                    ProductId::new(2),
                    "Vanity mirror",
                    Price::from_minor(4500, usd),
                    NonZeroU32::new(1).unwrap(),
                )
                .with_selected(false),
            ],
        )
        .unwrap()
    }

    fn at_review() -> Checkout {
        Checkout::begin(&cart(), 500)
            .unwrap()
            .with_address(sample_address())
            .unwrap()
            .with_payment(PaymentMethod::Card)
            .unwrap()
    }

    #[test]
    fn test_begin_requires_selection() {
        let empty = cart().toggle_item_selection(ProductId::new(1));
        assert_eq!(
            Checkout::begin(&empty, 0),
            Err(CheckoutError::NothingSelected)
        );
        assert_eq!(
            Checkout::begin(&Cart::new(CurrencyCode::USD), 0),
            Err(CheckoutError::NothingSelected)
        );
    }

    #[test]
    fn test_begin_snapshots_selected_rows() {
        let checkout = Checkout::begin(&cart(), 0).unwrap();
        assert_eq!(checkout.stage(), CheckoutStage::Address);
        assert_eq!(checkout.items().len(), 1);
        assert_eq!(checkout.items()[0].id(), ProductId::new(1));
    }

    #[test]
    fn test_totals_add_shipping() {
        let totals = Checkout::begin(&cart(), 500).unwrap().totals();
        assert_eq!(totals.subtotal.amount_minor(), 4000);
        assert_eq!(totals.shipping.amount_minor(), 500);
        assert_eq!(totals.total.amount_minor(), 4500);
    }

    #[test]
    fn test_total_saturates_with_large_fee() {
        let totals = Checkout::begin(&cart(), u64::MAX).unwrap().totals();
        assert_eq!(totals.shipping.amount_minor(), u64::MAX);
        assert_eq!(totals.total.amount_minor(), u64::MAX);
    }

    #[test]
    fn test_happy_path_reaches_confirmation() {
        let (checkout, confirmation) = at_review().place_order().unwrap();
        assert_eq!(checkout.stage(), CheckoutStage::Confirmed);
        assert_eq!(confirmation.totals.total.amount_minor(), 4500);
        assert_eq!(confirmation.payment_method, PaymentMethod::Card);
        assert_eq!(
            confirmation.product_ids().collect::<Vec<_>>(),
            vec![ProductId::new(1)]
        );
    }

    #[test]
    fn test_payment_before_address_is_rejected() {
        let result = Checkout::begin(&cart(), 0)
            .unwrap()
            .with_payment(PaymentMethod::Wallet);
        assert!(matches!(
            result,
            Err(CheckoutError::InvalidTransition {
                from: CheckoutStage::Address,
                ..
            })
        ));
    }

    #[test]
    fn test_place_order_before_review_is_rejected() {
        let checkout = Checkout::begin(&cart(), 0)
            .unwrap()
            .with_address(sample_address())
            .unwrap();
        assert!(matches!(
            checkout.place_order(),
            Err(CheckoutError::InvalidTransition {
                from: CheckoutStage::Payment,
                ..
            })
        ));
    }

    #[test]
    fn test_incomplete_address_is_rejected() {
        let address = ShippingAddress {
            line1: String::new(),
            ..sample_address()
        };
        let result = Checkout::begin(&cart(), 0).unwrap().with_address(address);
        assert_eq!(
            result,
            Err(CheckoutError::InvalidAddress(AddressError::MissingField(
                "line1"
            )))
        );
    }

    #[test]
    fn test_review_allows_edits_without_leaving_review() {
        let checkout = at_review()
            .with_payment(PaymentMethod::CashOnDelivery)
            .unwrap()
            .with_address(ShippingAddress {
                city: "Abuja".to_string(),
                ..sample_address()
            })
            .unwrap();
        assert_eq!(checkout.stage(), CheckoutStage::Review);
        assert_eq!(
            checkout.payment_method(),
            Some(PaymentMethod::CashOnDelivery)
        );
        assert_eq!(checkout.address().unwrap().city, "Abuja");
    }

    #[test]
    fn test_confirmed_checkout_is_terminal() {
        let (checkout, _) = at_review().place_order().unwrap();
        assert!(checkout.clone().with_address(sample_address()).is_err());
        assert!(checkout.clone().with_payment(PaymentMethod::Card).is_err());
        assert!(checkout.place_order().is_err());
    }
}
