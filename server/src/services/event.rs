//! Event service — list and create events.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use super::access::Identity;
use crate::db;

pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("only admins may create events")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    pub capacity: Option<i32>,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Body of `POST /api/events`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(default)]
    pub capacity: Option<i32>,
}

const EVENT_COLUMNS: &str = "id, title, description, location, starts_at, capacity, created_by, created_at";

fn event_from_row(row: &PgRow) -> Event {
    Event {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        location: row.get("location"),
        starts_at: row.get("starts_at"),
        capacity: row.get("capacity"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    }
}

/// Reject blank/oversized titles and non-positive capacities.
///
/// # Errors
///
/// Returns [`EventError::Validation`] describing the first problem found.
pub fn validate_new_event(event: &NewEvent) -> Result<(), EventError> {
    let title = event.title.trim();
    if title.is_empty() {
        return Err(EventError::Validation("title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(EventError::Validation(format!("title must be at most {MAX_TITLE_LEN} characters")));
    }
    if event.capacity.is_some_and(|c| c <= 0) {
        return Err(EventError::Validation("capacity must be positive".into()));
    }
    Ok(())
}

/// All events, soonest first.
pub async fn list_events(pool: &PgPool, identity: &Identity) -> Result<Vec<Event>, EventError> {
    let mut tx = db::begin_as(pool, identity.user_id).await?;
    let rows = sqlx::query(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY starts_at, id"))
        .fetch_all(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(rows.iter().map(event_from_row).collect())
}

/// Create an event as `identity`. Admin only.
///
/// # Errors
///
/// `Forbidden` for non-admins, `Validation` for bad input.
pub async fn create_event(pool: &PgPool, identity: &Identity, event: &NewEvent) -> Result<Event, EventError> {
    if !identity.is_admin_by_role() {
        return Err(EventError::Forbidden);
    }
    validate_new_event(event)?;

    let mut tx = db::begin_as(pool, identity.user_id).await?;
    let row = sqlx::query(&format!(
        r"INSERT INTO events (title, description, location, starts_at, capacity, created_by)
          VALUES ($1, $2, $3, $4, $5, $6)
          RETURNING {EVENT_COLUMNS}"
    ))
    .bind(event.title.trim())
    .bind(event.description.as_deref())
    .bind(event.location.as_deref())
    .bind(event.starts_at)
    .bind(event.capacity)
    .bind(identity.user_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(event_from_row(&row))
}

#[cfg(test)]
#[path = "event_test.rs"]
mod tests;
