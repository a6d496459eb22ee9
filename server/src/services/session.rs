//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! Sign-in and confirmed sign-up create a long-lived opaque token that the
//! browser carries as an HttpOnly cookie. Only the SHA-256 of the token is
//! stored, so a leaked `sessions` table cannot be replayed.
//!
//! Session lookup joins the account with its profile. A missing profile
//! (trigger failure not yet reconciled) still yields a usable session with
//! the default role.

use std::fmt::Write;

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::access::Identity;
use super::profile::Role;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Hex SHA-256 of a token, as stored in `sessions` and `email_confirmations`.
#[must_use]
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    bytes_to_hex(&digest)
}

/// Account returned from session validation; serialized as the `user` object
/// of auth responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity { user_id: self.id, email: self.email.clone(), role: self.role }
    }
}

const SESSION_USER_COLUMNS: &str = r"
    a.id,
    COALESCE(p.email, a.email) AS email,
    COALESCE(p.full_name, a.full_name) AS full_name,
    COALESCE(p.role, 'user') AS role,
    p.avatar_url";

fn session_user_from_row(row: &PgRow) -> SessionUser {
    let role: String = row.get("role");
    SessionUser {
        id: row.get("id"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        role: Role::from_db(&role),
        avatar_url: row.get("avatar_url"),
    }
}

/// Create a session for the given user, returning the raw token.
pub async fn create_session(pool: &PgPool, user_id: Uuid, ttl_hours: i64) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query(
        "INSERT INTO sessions (token_hash, user_id, expires_at)
         VALUES ($1, $2, now() + make_interval(hours => $3::int))",
    )
    .bind(hash_token(&token))
    .bind(user_id)
    .bind(i32::try_from(ttl_hours).unwrap_or(i32::MAX))
    .execute(pool)
    .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r"SELECT {SESSION_USER_COLUMNS}
          FROM sessions s
          JOIN auth_users a ON a.id = s.user_id
          LEFT JOIN user_profiles p ON p.id = a.id
          WHERE s.token_hash = $1 AND s.expires_at > now()"
    ))
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(session_user_from_row))
}

/// Load the session view of an account without a token.
pub async fn fetch_user(pool: &PgPool, user_id: Uuid) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r"SELECT {SESSION_USER_COLUMNS}
          FROM auth_users a
          LEFT JOIN user_profiles p ON p.id = a.id
          WHERE a.id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(session_user_from_row))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(hash_token(token))
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove expired sessions, returning how many were deleted.
pub async fn purge_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
