//! Shared DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON bodies so serde round-trips stay
//! lossless. Role strings are lowercase on the wire (`"user"`, `"admin"`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authorization role stored on a user profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// An authenticated user as returned by sign-in, sign-up and `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Auth identity (UUID string). Matches the profile id.
    pub id: String,
    pub email: String,
    /// Display name from the profile, if one exists yet.
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body of a successful `POST /api/auth/sign-in`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user: AuthUser,
}

/// Body of a successful `POST /api/auth/sign-up`.
///
/// When `confirmation_required` is set no session cookie was issued and the
/// user must confirm their email before signing in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub user: AuthUser,
    #[serde(default)]
    pub confirmation_required: bool,
}

/// Error envelope returned by every failing API call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable machine-readable code (e.g. `"invalid_credentials"`).
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message as produced by the auth service.
    pub message: String,
}
