//! Registration service — sign up for events, list and cancel registrations.
//!
//! DESIGN
//! ======
//! Every query runs under [`db::begin_as`], so the registration policies
//! decide which rows exist for the caller. Listing additionally filters with
//! [`access::can_access_registration`] and cancelling checks it before the
//! delete, keeping the Rust and SQL rules observably identical.
//!
//! Capacity is checked with `registration_count()`, a security-definer
//! function, because RLS would otherwise only let a caller count their own
//! rows.

use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use super::access::{self, Identity};
use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("event not found: {0}")]
    EventNotFound(Uuid),
    #[error("event is full")]
    EventFull,
    #[error("already registered for this event")]
    AlreadyRegistered,
    #[error("registration not found: {0}")]
    NotFound(Uuid),
    #[error("not allowed to modify registration {0}")]
    Forbidden(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, email, full_name, created_at";

fn registration_from_row(row: &PgRow) -> Registration {
    Registration {
        id: row.get("id"),
        event_id: row.get("event_id"),
        user_id: row.get("user_id"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        created_at: row.get("created_at"),
    }
}

/// Whether one more registration fits.
#[must_use]
pub fn has_capacity(capacity: Option<i32>, registered: i64) -> bool {
    capacity.is_none_or(|cap| registered < i64::from(cap))
}

/// Register `identity` for `event_id` under their profile email.
///
/// # Errors
///
/// `EventNotFound`, `EventFull`, or `AlreadyRegistered`.
pub async fn register(
    pool: &PgPool,
    identity: &Identity,
    event_id: Uuid,
    full_name: Option<&str>,
) -> Result<Registration, RegistrationError> {
    let mut tx = db::begin_as(pool, identity.user_id).await?;

    let event = sqlx::query("SELECT capacity, registration_count(id) AS registered FROM events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RegistrationError::EventNotFound(event_id))?;
    if !has_capacity(event.get("capacity"), event.get("registered")) {
        return Err(RegistrationError::EventFull);
    }

    let full_name = full_name.map(str::trim).filter(|n| !n.is_empty());
    let row = sqlx::query(&format!(
        r"INSERT INTO registrations (event_id, user_id, email, full_name)
          VALUES ($1, $2, $3, $4)
          ON CONFLICT (event_id, email) DO NOTHING
          RETURNING {REGISTRATION_COLUMNS}"
    ))
    .bind(event_id)
    .bind(identity.user_id)
    .bind(&identity.email)
    .bind(full_name)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(RegistrationError::AlreadyRegistered)?;

    tx.commit().await?;
    Ok(registration_from_row(&row))
}

/// Registrations visible to `identity`, newest first.
pub async fn list_registrations(pool: &PgPool, identity: &Identity) -> Result<Vec<Registration>, RegistrationError> {
    let mut tx = db::begin_as(pool, identity.user_id).await?;
    let rows = sqlx::query(&format!(
        "SELECT {REGISTRATION_COLUMNS} FROM registrations ORDER BY created_at DESC, id"
    ))
    .fetch_all(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(rows
        .iter()
        .map(registration_from_row)
        .filter(|r| access::can_access_registration(identity, r))
        .collect())
}

/// Delete a registration the caller owns or administers.
///
/// # Errors
///
/// `NotFound` when the row does not exist or is hidden by RLS, `Forbidden`
/// when the access predicate denies it.
pub async fn cancel_registration(
    pool: &PgPool,
    identity: &Identity,
    registration_id: Uuid,
) -> Result<(), RegistrationError> {
    let mut tx = db::begin_as(pool, identity.user_id).await?;

    let row = sqlx::query(&format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"))
        .bind(registration_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RegistrationError::NotFound(registration_id))?;
    let registration = registration_from_row(&row);
    if !access::can_access_registration(identity, &registration) {
        return Err(RegistrationError::Forbidden(registration_id));
    }

    sqlx::query("DELETE FROM registrations WHERE id = $1")
        .bind(registration_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
