//! Account route handlers.
//!
//! These routes require a signed-in user.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Profile;
use crate::services::ProfileService;
use crate::services::profile::ProfileForm;
use crate::state::AppState;

/// Show the signed-in user's profile.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Profile>> {
    let profile = ProfileService::new(state.identity()).load(user.id).await?;
    Ok(Json(profile))
}

/// Write the profile for the first time.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn complete_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Profile>> {
    let profile = ProfileService::new(state.identity())
        .complete(&user, form)
        .await?;
    Ok(Json(profile))
}

/// Change some profile fields.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Profile>> {
    let profile = ProfileService::new(state.identity())
        .update(&user, form)
        .await?;
    Ok(Json(profile))
}
