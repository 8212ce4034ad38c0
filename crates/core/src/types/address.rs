//! Shipping address entered during checkout.

use serde::{Deserialize, Serialize};

/// Errors from [`ShippingAddress::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// A required field is empty or only whitespace.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Check that every required field has content.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::MissingField` naming the first blank field.
    pub fn validate(&self) -> Result<(), AddressError> {
        let required = [
            ("full_name", &self.full_name),
            ("line1", &self.line1),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
            ("phone", &self.phone),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(AddressError::MissingField(*name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Buyer".to_string(),
        line1: "12 Glass Street".to_string(),
        line2: None,
        city: "Lagos".to_string(),
        postal_code: "100001".to_string(),
        country: "NG".to_string(),
        phone: "+2348000000000".to_string(),
    }
}
