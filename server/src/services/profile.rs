//! Profile service — read and update `user_profiles` rows.
//!
//! DESIGN
//! ======
//! Profiles are created by the `handle_new_user` trigger, never by this
//! module. Reads and updates run inside [`db::begin_as`] so the profile RLS
//! policies apply; the same rules are checked up front with
//! [`access`](super::access) so callers get a precise error instead of an
//! empty result.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use super::access::{self, Identity};
use crate::db;

pub const MIN_FULL_NAME_LEN: usize = 2;

// =============================================================================
// TYPES
// =============================================================================

/// Account role stored in `user_profiles.role`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Parse a stored role. Unknown values read as `User`.
    #[must_use]
    pub fn from_db(raw: &str) -> Self {
        match raw {
            "admin" => Self::Admin,
            _ => Self::User,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(Uuid),
    #[error("not allowed to modify profile {0}")]
    Forbidden(Uuid),
    #[error("only admins may change roles")]
    RoleChangeForbidden,
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.avatar_url.is_none() && self.role.is_none()
    }
}

const PROFILE_COLUMNS: &str = "id, full_name, email, role, avatar_url, created_at, updated_at";

fn profile_from_row(row: &PgRow) -> UserProfile {
    let role: String = row.get("role");
    UserProfile {
        id: row.get("id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        role: Role::from_db(&role),
        avatar_url: row.get("avatar_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Check an update against the profile access rules before touching the DB.
///
/// # Errors
///
/// `Forbidden` when the caller may not edit `profile_id`,
/// `RoleChangeForbidden` for a role change by a non-admin, `Validation` for a
/// too-short name.
pub fn check_update(identity: &Identity, profile_id: Uuid, update: &ProfileUpdate) -> Result<(), ProfileError> {
    if !access::can_access_profile(identity, profile_id) {
        return Err(ProfileError::Forbidden(profile_id));
    }
    if update.role.is_some() && !access::can_change_role(identity) {
        return Err(ProfileError::RoleChangeForbidden);
    }
    if let Some(name) = &update.full_name {
        if name.trim().chars().count() < MIN_FULL_NAME_LEN {
            return Err(ProfileError::Validation(format!(
                "full_name must be at least {MIN_FULL_NAME_LEN} characters"
            )));
        }
    }
    Ok(())
}

// =============================================================================
// QUERIES
// =============================================================================

/// Load one profile as `identity`.
///
/// # Errors
///
/// `Forbidden` if the caller may not read it, `NotFound` if no row is visible.
pub async fn get_profile(pool: &PgPool, identity: &Identity, profile_id: Uuid) -> Result<UserProfile, ProfileError> {
    if !access::can_access_profile(identity, profile_id) {
        return Err(ProfileError::Forbidden(profile_id));
    }

    let mut tx = db::begin_as(pool, identity.user_id).await?;
    let row = sqlx::query(&format!("SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = $1"))
        .bind(profile_id)
        .fetch_optional(&mut *tx)
        .await?;
    tx.commit().await?;

    row.as_ref()
        .map(profile_from_row)
        .ok_or(ProfileError::NotFound(profile_id))
}

/// Apply `update` to `profile_id` as `identity`. `updated_at` is stamped by
/// the `touch_updated_at` trigger.
///
/// # Errors
///
/// See [`check_update`]; `NotFound` if the row is missing or hidden by RLS.
pub async fn update_profile(
    pool: &PgPool,
    identity: &Identity,
    profile_id: Uuid,
    update: &ProfileUpdate,
) -> Result<UserProfile, ProfileError> {
    check_update(identity, profile_id, update)?;
    if update.is_empty() {
        return get_profile(pool, identity, profile_id).await;
    }

    let mut tx = db::begin_as(pool, identity.user_id).await?;
    let row = sqlx::query(&format!(
        r"UPDATE user_profiles
          SET full_name = COALESCE($2, full_name),
              avatar_url = COALESCE($3, avatar_url),
              role = COALESCE($4, role)
          WHERE id = $1
          RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(profile_id)
    .bind(update.full_name.as_deref().map(str::trim))
    .bind(update.avatar_url.as_deref())
    .bind(update.role.map(Role::as_str))
    .fetch_optional(&mut *tx)
    .await?;
    tx.commit().await?;

    row.as_ref()
        .map(profile_from_row)
        .ok_or(ProfileError::NotFound(profile_id))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
