//! Auth failure classification.
//!
//! DESIGN
//! ======
//! The server attaches a stable `code` to every auth error; that is matched
//! first. Bodies without a known code fall back to case-sensitive substring
//! matching on the message, which keeps older provider-style messages
//! working.

#[cfg(test)]
#[path = "auth_error_test.rs"]
mod auth_error_test;

use super::types::ErrorBody;
use crate::util::validation::{EMAIL_INVALID, FormField, PASSWORD_TOO_SHORT};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const EMAIL_TAKEN_MESSAGE: &str = "An account with this email already exists";
pub const EMAIL_NOT_CONFIRMED_MESSAGE: &str = "Please check your email and confirm your account before signing in";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again";
pub const CONNECTION_ERROR_MESSAGE: &str = "Unable to connect. Please check your connection and try again";

/// Failure returned by an auth request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    /// The service answered with an error body.
    Remote { code: Option<String>, message: String },
    /// The request never produced a usable response.
    Transport(String),
}

impl AuthFailure {
    #[must_use]
    pub fn remote(code: Option<&str>, message: impl Into<String>) -> Self {
        Self::Remote { code: code.map(str::to_owned), message: message.into() }
    }

    #[must_use]
    pub fn from_error_body(body: ErrorBody) -> Self {
        Self::Remote { code: body.error.code, message: body.error.message }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote { message, .. } => f.write_str(message),
            Self::Transport(detail) => write!(f, "transport error: {detail}"),
        }
    }
}

/// Known auth error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthErrorKind {
    InvalidCredentials,
    EmailTaken,
    WeakPassword,
    InvalidEmail,
    EmailNotConfirmed,
}

/// Substring table used when no structured code is present.
const MESSAGE_PATTERNS: &[(&str, AuthErrorKind)] = &[
    ("Invalid login credentials", AuthErrorKind::InvalidCredentials),
    ("User already registered", AuthErrorKind::EmailTaken),
    ("already been registered", AuthErrorKind::EmailTaken),
    ("Password should be at least", AuthErrorKind::WeakPassword),
    ("Unable to validate email address", AuthErrorKind::InvalidEmail),
    ("Email not confirmed", AuthErrorKind::EmailNotConfirmed),
];

impl AuthErrorKind {
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid_credentials" => Some(Self::InvalidCredentials),
            "user_already_exists" | "email_exists" => Some(Self::EmailTaken),
            "weak_password" => Some(Self::WeakPassword),
            "email_address_invalid" => Some(Self::InvalidEmail),
            "email_not_confirmed" => Some(Self::EmailNotConfirmed),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_message(message: &str) -> Option<Self> {
        MESSAGE_PATTERNS
            .iter()
            .find(|(pattern, _)| message.contains(*pattern))
            .map(|(_, kind)| *kind)
    }

    /// The UI error this category surfaces as.
    #[must_use]
    pub fn form_error(self) -> FormError {
        match self {
            Self::InvalidCredentials => FormError::General(INVALID_CREDENTIALS_MESSAGE.to_owned()),
            Self::EmailTaken => FormError::Field(FormField::Email, EMAIL_TAKEN_MESSAGE.to_owned()),
            Self::WeakPassword => FormError::Field(FormField::Password, PASSWORD_TOO_SHORT.to_owned()),
            Self::InvalidEmail => FormError::Field(FormField::Email, EMAIL_INVALID.to_owned()),
            Self::EmailNotConfirmed => FormError::General(EMAIL_NOT_CONFIRMED_MESSAGE.to_owned()),
        }
    }
}

/// Where a failure lands on the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    /// Banner above the form.
    General(String),
    /// Inline message under one input.
    Field(FormField, String),
}

/// Map an auth failure to the error shown on the form.
#[must_use]
pub fn classify(failure: &AuthFailure) -> FormError {
    match failure {
        AuthFailure::Transport(_) => FormError::General(CONNECTION_ERROR_MESSAGE.to_owned()),
        AuthFailure::Remote { code, message } => {
            let kind = code
                .as_deref()
                .and_then(AuthErrorKind::from_code)
                .or_else(|| AuthErrorKind::from_message(message));
            match kind {
                Some(kind) => kind.form_error(),
                None if message.trim().is_empty() => FormError::General(UNEXPECTED_ERROR_MESSAGE.to_owned()),
                None => FormError::General(message.clone()),
            }
        }
    }
}
