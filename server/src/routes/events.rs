//! Event routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use super::auth::AuthUser;
use super::error::ApiError;
use crate::services::event::{self, Event, EventError, NewEvent};
use crate::state::AppState;

pub(crate) fn event_error_to_status(err: &EventError) -> StatusCode {
    match err {
        EventError::Forbidden => StatusCode::FORBIDDEN,
        EventError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EventError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        let code = match &err {
            EventError::Forbidden => "forbidden",
            EventError::Validation(_) => "validation_failed",
            EventError::Database(_) => "unexpected_failure",
        };
        Self::from_status(event_error_to_status(&err), code, &err)
    }
}

/// `GET /api/events`
pub async fn list_events(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Event>>, ApiError> {
    Ok(Json(event::list_events(&state.pool, &auth.identity()).await?))
}

/// `POST /api/events`: admin only.
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let created = event::create_event(&state.pool, &auth.identity(), &body).await?;
    tracing::info!(event_id = %created.id, actor = %auth.user.id, "event created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
