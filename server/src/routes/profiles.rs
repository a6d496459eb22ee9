//! Profile routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::profile::{self, ProfileError, ProfileUpdate, UserProfile};
use crate::state::AppState;

pub(crate) fn profile_error_to_status(err: &ProfileError) -> StatusCode {
    match err {
        ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
        ProfileError::Forbidden(_) | ProfileError::RoleChangeForbidden => StatusCode::FORBIDDEN,
        ProfileError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ProfileError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn profile_error_code(err: &ProfileError) -> &'static str {
    match err {
        ProfileError::NotFound(_) => "not_found",
        ProfileError::Forbidden(_) | ProfileError::RoleChangeForbidden => "forbidden",
        ProfileError::Validation(_) => "validation_failed",
        ProfileError::Database(_) => "unexpected_failure",
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        Self::from_status(profile_error_to_status(&err), profile_error_code(&err), &err)
    }
}

/// `GET /api/profiles/{id}`: own profile, or any profile for admins.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = profile::get_profile(&state.pool, &auth.identity(), profile_id).await?;
    Ok(Json(profile))
}

/// `PATCH /api/profiles/{id}`: update name/avatar; role is admin-only.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(profile_id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = profile::update_profile(&state.pool, &auth.identity(), profile_id, &update).await?;
    if update.role.is_some() {
        tracing::info!(actor = %auth.user.id, %profile_id, role = profile.role.as_str(), "profile role changed");
    }
    Ok(Json(profile))
}

#[cfg(test)]
#[path = "profiles_test.rs"]
mod tests;
