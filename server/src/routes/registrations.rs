//! Registration routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::registration::{self, Registration, RegistrationError};
use crate::state::AppState;

pub(crate) fn registration_error_to_status(err: &RegistrationError) -> StatusCode {
    match err {
        RegistrationError::EventNotFound(_) | RegistrationError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistrationError::EventFull | RegistrationError::AlreadyRegistered => StatusCode::CONFLICT,
        RegistrationError::Forbidden(_) => StatusCode::FORBIDDEN,
        RegistrationError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn registration_error_code(err: &RegistrationError) -> &'static str {
    match err {
        RegistrationError::EventNotFound(_) | RegistrationError::NotFound(_) => "not_found",
        RegistrationError::EventFull => "event_full",
        RegistrationError::AlreadyRegistered => "already_registered",
        RegistrationError::Forbidden(_) => "forbidden",
        RegistrationError::Database(_) => "unexpected_failure",
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        Self::from_status(registration_error_to_status(&err), registration_error_code(&err), &err)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// `POST /api/events/{id}/registrations`: register the caller.
pub async fn register_for_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let full_name = body.full_name.as_deref().or(auth.user.full_name.as_deref());
    let created = registration::register(&state.pool, &auth.identity(), event_id, full_name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/registrations`: registrations visible to the caller.
pub async fn list_registrations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Registration>>, ApiError> {
    Ok(Json(registration::list_registrations(&state.pool, &auth.identity()).await?))
}

/// `DELETE /api/registrations/{id}`
pub async fn cancel_registration(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(registration_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    registration::cancel_registration(&state.pool, &auth.identity(), registration_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "registrations_test.rs"]
mod tests;
