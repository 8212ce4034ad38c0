//! Identity and profile store.
//!
//! Account creation, sign-in, password reset and the per-account profile
//! document live in a hosted auth/document service. [`IdentityStore`] is the
//! seam the storefront talks to; [`MemoryIdentityStore`] keeps everything in
//! process.
//!
//! Every call is a single request/response. Callers do not retry; a failed
//! call ends the user action that triggered it.

mod memory;
#[cfg(test)]
pub(crate) mod testing;

use std::future::Future;

use secrecy::SecretString;
use thiserror::Error;

use mirror_core::{Email, UserId};

use crate::models::{CurrentUser, Profile};

pub use memory::{MemoryIdentityStore, PasswordResetRequest};

/// Errors reported by the identity store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// An account already exists for this email.
    #[error("email address is already in use")]
    EmailInUse,

    /// The store refused the email address.
    #[error("email address is invalid")]
    InvalidEmail,

    /// The store refused the password as too weak.
    #[error("password is too weak")]
    WeakPassword,

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account for this email or ID.
    #[error("user not found")]
    UserNotFound,

    /// The store could not be reached or failed unexpectedly.
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// Operations offered by the identity and profile store.
pub trait IdentityStore: Send + Sync {
    /// Create an account and return its ID.
    fn create_account(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<UserId, IdentityError>> + Send;

    /// Check credentials and return the signed-in user.
    fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<CurrentUser, IdentityError>> + Send;

    /// Send a password reset link to the account's email.
    fn send_password_reset(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<(), IdentityError>> + Send;

    /// Fetch the profile document, `None` if it was never written.
    fn get_profile(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Profile>, IdentityError>> + Send;

    /// Write the whole profile document.
    fn set_profile(
        &self,
        user_id: UserId,
        profile: &Profile,
    ) -> impl Future<Output = Result<(), IdentityError>> + Send;

    /// End the user's sign-in.
    fn sign_out(&self, user_id: UserId) -> impl Future<Output = ()> + Send;
}
