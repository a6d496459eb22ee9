//! Password auth service — sign-up, sign-in and email confirmation.
//!
//! DESIGN
//! ======
//! Accounts live in `auth_users`; inserting one fires `handle_new_user`,
//! which creates the matching profile. This module never writes profiles.
//! Passwords are stored as Argon2 PHC strings and hashed on the blocking
//! pool so a burst of sign-ins does not stall the async runtime.
//!
//! ERROR HANDLING
//! ==============
//! Client-facing variants display the exact messages the browser classifier
//! matches on, and [`AuthError::code`] gives the structured code it checks
//! first. Unknown-email and wrong-password both surface as
//! `InvalidCredentials`.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::Rng;
use sqlx::{PgPool, Row};
use time::OffsetDateTime;
use uuid::Uuid;

use super::access::is_reserved_admin_email;
use super::session::{generate_token, hash_token};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("User already registered")]
    UserAlreadyExists,
    #[error("Password should be at least 6 characters")]
    WeakPassword,
    #[error("Unable to validate email address: invalid format")]
    InvalidEmail,
    #[error("Email not confirmed")]
    EmailNotConfirmed,
    #[error("Email link is invalid or has expired")]
    InvalidConfirmationToken,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Structured error code sent alongside the message.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::UserAlreadyExists => "user_already_exists",
            Self::WeakPassword => "weak_password",
            Self::InvalidEmail => "email_address_invalid",
            Self::EmailNotConfirmed => "email_not_confirmed",
            Self::InvalidConfirmationToken => "otp_expired",
            Self::Hashing(_) | Self::Database(_) => "unexpected_failure",
        }
    }
}

// =============================================================================
// INPUT NORMALIZATION
// =============================================================================

/// Trim and lowercase an email, rejecting anything not shaped like
/// `local@domain.tld`.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.chars().any(char::is_whitespace) {
        return None;
    }
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.contains('@') {
        return None;
    }
    let (host, tld) = domain.rsplit_once('.')?;
    if host.is_empty() || tld.is_empty() || host.split('.').any(str::is_empty) {
        return None;
    }
    Some(normalized)
}

/// Reject passwords shorter than [`MIN_PASSWORD_LEN`] characters.
///
/// # Errors
///
/// Returns [`AuthError::WeakPassword`].
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Trimmed full name, or `None` when blank.
#[must_use]
pub fn normalize_full_name(full_name: Option<&str>) -> Option<String> {
    full_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

fn hash_password_blocking(password: &str) -> Result<String, AuthError> {
    let salt_bytes: [u8; 16] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn verify_password_blocking(password: &str, stored: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Hash a password into an Argon2 PHC string.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if hashing fails or the worker panics.
pub async fn hash_password(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password_blocking(&password))
        .await
        .map_err(|e| AuthError::Hashing(format!("hash task failed: {e}")))?
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns [`AuthError::Hashing`] if the stored hash is malformed.
pub async fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let stored = stored.to_owned();
    tokio::task::spawn_blocking(move || verify_password_blocking(&password, &stored))
        .await
        .map_err(|e| AuthError::Hashing(format!("verify task failed: {e}")))?
}

// =============================================================================
// SIGN-UP / SIGN-IN
// =============================================================================

/// Whether `email` must be confirmed before it can sign in. Reserved admin
/// addresses always need confirmation, whatever the server setting.
#[must_use]
pub fn confirmation_required_for(email: &str, require_confirmation: bool) -> bool {
    require_confirmation || is_reserved_admin_email(email)
}

/// Result of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user_id: Uuid,
    /// Raw confirmation token, present when the account must be confirmed
    /// before it can sign in.
    pub confirmation_token: Option<String>,
}

/// Create an account. The profile row is created by the database trigger.
///
/// # Errors
///
/// `InvalidEmail`, `WeakPassword`, or `UserAlreadyExists` for bad input;
/// `Database`/`Hashing` otherwise.
pub async fn sign_up(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: Option<&str>,
    require_confirmation: bool,
) -> Result<SignUpOutcome, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    validate_password(password)?;
    let full_name = normalize_full_name(full_name);
    let require_confirmation = confirmation_required_for(&email, require_confirmation);
    let password_hash = hash_password(password).await?;

    let confirmed_at = (!require_confirmation).then(OffsetDateTime::now_utc);
    let row = sqlx::query(
        r"INSERT INTO auth_users (email, password_hash, full_name, email_confirmed_at)
          VALUES ($1, $2, $3, $4)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(&full_name)
    .bind(confirmed_at)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Err(AuthError::UserAlreadyExists);
    };
    let user_id: Uuid = row.get("id");

    let confirmation_token = if require_confirmation {
        Some(create_confirmation(pool, user_id).await?)
    } else {
        None
    };

    Ok(SignUpOutcome { user_id, confirmation_token })
}

/// Verify credentials and return the account id.
///
/// # Errors
///
/// `InvalidCredentials` for an unknown email or wrong password,
/// `EmailNotConfirmed` when confirmation is required and still pending.
pub async fn sign_in(
    pool: &PgPool,
    email: &str,
    password: &str,
    require_confirmation: bool,
) -> Result<Uuid, AuthError> {
    let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;

    let row = sqlx::query("SELECT id, password_hash, email_confirmed_at FROM auth_users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let stored: String = row.get("password_hash");
    if !verify_password(password, &stored).await? {
        return Err(AuthError::InvalidCredentials);
    }

    let confirmed_at: Option<OffsetDateTime> = row.get("email_confirmed_at");
    if confirmation_required_for(&email, require_confirmation) && confirmed_at.is_none() {
        return Err(AuthError::EmailNotConfirmed);
    }

    Ok(row.get("id"))
}

// =============================================================================
// EMAIL CONFIRMATION
// =============================================================================

/// Issue a confirmation token for `user_id`, replacing any unused one.
pub async fn create_confirmation(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    sqlx::query("DELETE FROM email_confirmations WHERE user_id = $1 AND consumed_at IS NULL")
        .bind(user_id)
        .execute(pool)
        .await?;

    let token = generate_token();
    sqlx::query("INSERT INTO email_confirmations (token_hash, user_id) VALUES ($1, $2)")
        .bind(hash_token(&token))
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Consume a confirmation token and mark the account confirmed.
///
/// # Errors
///
/// Returns [`AuthError::InvalidConfirmationToken`] if the token is unknown,
/// expired, or already used.
pub async fn confirm_email(pool: &PgPool, token: &str) -> Result<Uuid, AuthError> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r"UPDATE email_confirmations
          SET consumed_at = now()
          WHERE token_hash = $1 AND consumed_at IS NULL AND expires_at > now()
          RETURNING user_id",
    )
    .bind(hash_token(token))
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AuthError::InvalidConfirmationToken)?;
    let user_id: Uuid = row.get("user_id");

    sqlx::query("UPDATE auth_users SET email_confirmed_at = COALESCE(email_confirmed_at, now()) WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user_id)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
