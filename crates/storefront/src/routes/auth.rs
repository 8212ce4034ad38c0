//! Authentication route handlers.
//!
//! Registration, sign-in, password reset and sign-out. The signed-in user is
//! kept in the session.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::services::AccountService;
use crate::services::auth::{PasswordResetForm, RegisterForm, SignInForm};
use crate::state::AppState;

/// Acknowledgement body for requests with no other result.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: &'static str,
}

async fn start_session(session: &Session, user: &CurrentUser) -> Result<()> {
    set_current_user(session, user).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Create an account and sign it in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<CurrentUser>)> {
    let user = AccountService::new(state.identity()).register(&form).await?;
    start_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Sign in with email and password.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SignInForm>,
) -> Result<Json<CurrentUser>> {
    let user = AccountService::new(state.identity()).sign_in(&form).await?;
    start_session(&session, &user).await?;
    Ok(Json(user))
}

/// Request a password reset email.
#[instrument(skip_all)]
pub async fn password_reset(
    State(state): State<AppState>,
    Json(form): Json<PasswordResetForm>,
) -> Result<(StatusCode, Json<Ack>)> {
    AccountService::new(state.identity())
        .request_password_reset(&form)
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(Ack {
            message: "Password reset email sent.",
        }),
    ))
}

/// Sign out. Succeeds whether or not anyone was signed in.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<StatusCode> {
    if let Some(user) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await?
    {
        AccountService::new(state.identity()).sign_out(&user).await;
        tracing::info!(user_id = %user.id, "signed out");
    }
    clear_current_user(&session).await?;
    clear_sentry_user();
    Ok(StatusCode::NO_CONTENT)
}
