//! Status and choice enums shared across the storefront.

use serde::{Deserialize, Serialize};

/// Stage of a checkout in progress.
///
/// The stages are visited in declaration order; see [`crate::checkout`]
/// for the transitions between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Waiting for a shipping address.
    #[default]
    Address,
    /// Waiting for a payment method.
    Payment,
    /// Address and payment are set; the order can be placed.
    Review,
    /// The order has been placed. Terminal.
    Confirmed,
}

impl std::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Payment => write!(f, "payment"),
            Self::Review => write!(f, "review"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    CashOnDelivery,
    Wallet,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::CashOnDelivery => write!(f, "cash_on_delivery"),
            Self::Wallet => write!(f, "wallet"),
        }
    }
}

/// Gender as recorded on a customer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            "" | "unspecified" => Ok(Self::Unspecified),
            _ => Err(format!("invalid gender: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_stage_serializes_snake_case() {
        let json = serde_json::to_string(&CheckoutStage::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        assert_eq!(CheckoutStage::default(), CheckoutStage::Address);
    }

    #[test]
    fn test_payment_method_roundtrip_name() {
        let method: PaymentMethod = serde_json::from_str("\"cash_on_delivery\"").unwrap();
        assert_eq!(method, PaymentMethod::CashOnDelivery);
        assert_eq!(method.to_string(), "cash_on_delivery");
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("".parse::<Gender>().unwrap(), Gender::Unspecified);
        assert!("robot".parse::<Gender>().is_err());
    }
}
