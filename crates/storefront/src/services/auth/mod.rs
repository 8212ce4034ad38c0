//! Account service.
//!
//! Registration, sign-in, password reset and sign-out on top of an
//! [`IdentityStore`]. Form input is validated first; the store is only
//! contacted once every local check passes.

mod error;

pub use error::AuthError;

use serde::Deserialize;
use tracing::instrument;

use crate::identity::IdentityStore;
use crate::models::CurrentUser;
use crate::services::validation::{self, ValidationError};

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub accept_terms: bool,
}

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Password reset form data.
#[derive(Debug, Deserialize)]
pub struct PasswordResetForm {
    pub email: String,
}

/// Account operations against an identity store.
pub struct AccountService<'a, S> {
    store: &'a S,
}

impl<'a, S: IdentityStore> AccountService<'a, S> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register a new account and sign it in.
    ///
    /// Checks, in order: required fields, password confirmation, password
    /// length, accepted terms, email format.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if a local check fails (the store is
    /// not called), or `AuthError::Identity` if the store rejects the account.
    #[instrument(skip_all)]
    pub async fn register(&self, form: &RegisterForm) -> Result<CurrentUser, AuthError> {
        validation::require("email", &form.email)?;
        let password = validation::new_password(&form.password, &form.password_confirm)?;
        if !form.accept_terms {
            return Err(ValidationError::TermsNotAccepted.into());
        }
        let email = validation::email_field(&form.email)?;

        let id = self.store.create_account(&email, &password).await?;
        Ok(CurrentUser { id, email })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for blank or malformed input and
    /// `AuthError::Identity` if the credentials are rejected.
    #[instrument(skip_all)]
    pub async fn sign_in(&self, form: &SignInForm) -> Result<CurrentUser, AuthError> {
        validation::require("email", &form.email)?;
        validation::require("password", &form.password)?;
        let email = validation::email_field(&form.email)?;
        let password = secrecy::SecretString::from(form.password.clone());

        Ok(self.store.sign_in(&email, &password).await?)
    }

    /// Ask the store to send a password reset email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for a blank or malformed email and
    /// `AuthError::Identity` if the store cannot send the reset.
    #[instrument(skip_all)]
    pub async fn request_password_reset(&self, form: &PasswordResetForm) -> Result<(), AuthError> {
        let email = validation::email_field(&form.email)?;
        Ok(self.store.send_password_reset(&email).await?)
    }

    /// Sign the user out.
    #[instrument(skip_all, fields(user_id = %user.id))]
    pub async fn sign_out(&self, user: &CurrentUser) {
        self.store.sign_out(user.id).await;
    }
}
