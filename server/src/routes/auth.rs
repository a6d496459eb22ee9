//! Auth routes — password sign-in/sign-up, email confirmation, sessions.

use axum::extract::{FromRef, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use super::error::ApiError;
use crate::services::access::Identity;
use crate::services::auth::{self as auth_svc, AuthError};
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn session_cookie(token: String, secure: bool, ttl_hours: i64) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::hours(ttl_hours))
        .build()
}

pub(crate) fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn confirmation_path(token: &str) -> String {
    format!("/api/auth/confirm?token={token}")
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::InvalidCredentials | AuthError::InvalidConfirmationToken => StatusCode::BAD_REQUEST,
        AuthError::EmailNotConfirmed => StatusCode::FORBIDDEN,
        AuthError::UserAlreadyExists | AuthError::WeakPassword | AuthError::InvalidEmail => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AuthError::Hashing(_) | AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::from_status(auth_error_to_status(&err), err.code(), &err)
    }
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl AuthUser {
    #[must_use]
    pub fn identity(&self) -> Identity {
        self.user.identity()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "session lookup failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SignInBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user: SessionUser,
    pub confirmation_required: bool,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    pub token: String,
}

async fn load_user(state: &AppState, user_id: Uuid) -> Result<SessionUser, ApiError> {
    session::fetch_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| ApiError::internal(&format!("account {user_id} vanished after auth")))
}

async fn start_session(state: &AppState, jar: CookieJar, user_id: Uuid) -> Result<CookieJar, ApiError> {
    let ttl_hours = state.config.session_ttl_hours;
    let token = session::create_session(&state.pool, user_id, ttl_hours).await?;
    Ok(jar.add(session_cookie(token, state.config.cookie_secure, ttl_hours)))
}

/// `POST /api/auth/sign-in`: verify credentials, set cookie, return user.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInBody>,
) -> Result<(CookieJar, Json<SignInResponse>), ApiError> {
    let user_id = auth_svc::sign_in(
        &state.pool,
        &body.email,
        &body.password,
        state.config.require_email_confirmation,
    )
    .await?;

    let jar = start_session(&state, jar, user_id).await?;
    let user = load_user(&state, user_id).await?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok((jar, Json(SignInResponse { user })))
}

/// `POST /api/auth/sign-up`: create account. Signs the user in unless email
/// confirmation is required, in which case the confirmation link is logged.
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignUpBody>,
) -> Result<(StatusCode, CookieJar, Json<SignUpResponse>), ApiError> {
    let outcome = auth_svc::sign_up(
        &state.pool,
        &body.email,
        &body.password,
        body.full_name.as_deref(),
        state.config.require_email_confirmation,
    )
    .await?;

    let user = load_user(&state, outcome.user_id).await?;
    let (jar, confirmation_required) = match &outcome.confirmation_token {
        Some(token) => {
            tracing::info!(
                user_id = %user.id,
                confirm_path = %confirmation_path(token),
                "account created; email confirmation pending"
            );
            (jar, true)
        }
        None => {
            tracing::info!(user_id = %user.id, "account created");
            (start_session(&state, jar, outcome.user_id).await?, false)
        }
    };

    Ok((StatusCode::CREATED, jar, Json(SignUpResponse { user, confirmation_required })))
}

/// `GET /api/auth/confirm?token=…`: confirm email, sign in, redirect home.
pub async fn confirm_email(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ConfirmQuery>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let user_id = auth_svc::confirm_email(&state.pool, &query.token).await?;
    let jar = start_session(&state, jar, user_id).await?;
    tracing::info!(%user_id, "email confirmed");
    Ok((jar, Redirect::to("/")))
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, "session delete failed during logout");
    }

    let jar = CookieJar::new().add(cleared_session_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
