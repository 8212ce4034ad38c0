//! Form validation.
//!
//! These checks run locally and must pass before the identity store is
//! contacted.

use secrecy::SecretString;
use thiserror::Error;

use mirror_core::{Email, EmailError};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A form field failed a local check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left blank.
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Terms and conditions were not accepted.
    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,

    /// Email is not a valid address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

impl ValidationError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyField(field) => format!("Please fill in your {}.", field.replace('_', " ")),
            Self::PasswordMismatch => "Passwords do not match.".to_string(),
            Self::PasswordTooShort { min } => {
                format!("Password must be at least {min} characters.")
            }
            Self::TermsNotAccepted => "Please accept the terms and conditions.".to_string(),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
        }
    }
}

/// Fail with `EmptyField(name)` if `value` is blank.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(name))
    } else {
        Ok(())
    }
}

/// Parse a required email field.
pub(crate) fn email_field(value: &str) -> Result<Email, ValidationError> {
    require("email", value)?;
    Ok(Email::parse(value)?)
}

/// Check a new password against its confirmation.
pub(crate) fn new_password(
    password: &str,
    confirmation: &str,
) -> Result<SecretString, ValidationError> {
    require("password", password)?;
    require("password_confirm", confirmation)?;
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(SecretString::from(password.to_string()))
}
