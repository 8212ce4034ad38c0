//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side failures are
//! captured to Sentry before the response is built; clients get a status
//! code and a readable message, never internal details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use mirror_core::{CartError, CheckoutError};

use crate::identity::IdentityError;
use crate::services::{AuthError, ProfileError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout transition rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Profile operation failed.
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

const fn identity_status(err: &IdentityError) -> StatusCode {
    match err {
        IdentityError::EmailInUse => StatusCode::CONFLICT,
        IdentityError::InvalidEmail | IdentityError::WeakPassword => StatusCode::BAD_REQUEST,
        IdentityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        IdentityError::UserNotFound => StatusCode::NOT_FOUND,
        IdentityError::Unavailable(_) => StatusCode::BAD_GATEWAY,
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Cart(_) => StatusCode::BAD_REQUEST,
            Self::Checkout(err) => match err {
                CheckoutError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
                CheckoutError::NothingSelected | CheckoutError::InvalidTransition { .. } => {
                    StatusCode::CONFLICT
                }
            },
            Self::Auth(AuthError::Validation(_)) | Self::Profile(ProfileError::Validation(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Auth(AuthError::Identity(err)) | Self::Profile(ProfileError::Identity(err)) => {
                identity_status(err)
            }
            Self::Profile(ProfileError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the client.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Session(_) => "Internal server error".to_string(),
            Self::Auth(err) => err.user_message(),
            Self::Profile(err) => err.user_message(),
            Self::Cart(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after sign-in.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on sign-out.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use mirror_core::{AddressError, CheckoutStage};

    use super::*;
    use crate::services::ValidationError;

    fn status(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 7".to_string());
        assert_eq!(err.to_string(), "Not found: product 7");
        assert_eq!(err.client_message(), "product 7 not found");
    }

    #[test]
    fn test_checkout_guards_conflict() {
        assert_eq!(status(CheckoutError::NothingSelected), StatusCode::CONFLICT);
        assert_eq!(
            status(CheckoutError::InvalidTransition {
                from: CheckoutStage::Address,
                action: "place the order",
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(CheckoutError::InvalidAddress(AddressError::MissingField(
                "city"
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(
            status(AuthError::Validation(ValidationError::PasswordMismatch)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AuthError::Identity(IdentityError::EmailInUse)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(AuthError::Identity(IdentityError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(AuthError::Identity(IdentityError::UserNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AuthError::Identity(IdentityError::Unavailable(
                "timeout".to_string()
            ))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_profile_and_session_status_codes() {
        assert_eq!(status(ProfileError::NotFound), StatusCode::NOT_FOUND);

        let session_failure = || {
            tower_sessions::session::Error::Store(tower_sessions::session_store::Error::Backend(
                "redis password leaked".to_string(),
            ))
        };
        assert_eq!(status(session_failure()), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::from(session_failure()).client_message(),
            "Internal server error"
        );
    }
}
