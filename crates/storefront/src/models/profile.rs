//! Customer profile document.

use serde::{Deserialize, Serialize};

use mirror_core::{Email, Gender};

/// Profile fields kept by the identity store, one document per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Gender,
    pub email: Email,
}

impl Profile {
    /// A blank profile for an account that has not filled one in yet.
    #[must_use]
    pub fn blank(email: Email) -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            gender: Gender::Unspecified,
            email,
        }
    }
}
