//! Authentication error types.

use thiserror::Error;

use crate::identity::IdentityError;
use crate::services::validation::ValidationError;

/// Errors that can occur during account operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Input failed a local check; the identity store was not called.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The identity store rejected the request.
    #[error("identity store error: {0}")]
    Identity(#[from] IdentityError),
}

impl AuthError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Identity(err) => match err {
                IdentityError::EmailInUse => {
                    "An account with this email already exists.".to_string()
                }
                IdentityError::InvalidEmail => "That email address is invalid.".to_string(),
                IdentityError::WeakPassword => "Please choose a stronger password.".to_string(),
                IdentityError::InvalidCredentials => "Incorrect email or password.".to_string(),
                IdentityError::UserNotFound => "No account found with this email.".to_string(),
                IdentityError::Unavailable(_) => {
                    "Something went wrong. Please try again.".to_string()
                }
            },
        }
    }
}
