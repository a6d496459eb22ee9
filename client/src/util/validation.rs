//! Client-side validation for the sign-in / sign-up form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth modal runs these checks before any request leaves the browser.
//! A non-empty `FieldErrors` blocks submission; the server re-validates
//! everything it receives.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_FULL_NAME_LEN: usize = 2;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const FULL_NAME_TOO_SHORT: &str = "Full name must be at least 2 characters";
pub const CONFIRM_REQUIRED: &str = "Please confirm your password";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";

/// Editable inputs of the auth form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Email,
    Password,
    FullName,
    ConfirmPassword,
}

/// Per-field error messages. `None` means the field is currently clean.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub confirm_password: Option<String>,
}

impl FieldErrors {
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        *self.slot_mut(field) = None;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.full_name.is_none() && self.confirm_password.is_none()
    }

    fn slot(&self, field: FormField) -> &Option<String> {
        match field {
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::FullName => &self.full_name,
            FormField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::FullName => &mut self.full_name,
            FormField::ConfirmPassword => &mut self.confirm_password,
        }
    }
}

/// Basic `local@domain.tld` shape check.
///
/// Requires exactly one `@`, a non-empty local part, no whitespace, and a
/// domain with at least one interior dot.
#[must_use]
pub fn is_valid_email_shape(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, c)| c == '.' && idx > 0 && idx + 1 < domain.len())
}

fn email_error(email: &str) -> Option<&'static str> {
    let email = email.trim();
    if email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email_shape(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some(PASSWORD_REQUIRED)
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some(PASSWORD_TOO_SHORT)
    } else {
        None
    }
}

fn full_name_error(full_name: &str) -> Option<&'static str> {
    let full_name = full_name.trim();
    if full_name.is_empty() {
        Some(FULL_NAME_REQUIRED)
    } else if full_name.chars().count() < MIN_FULL_NAME_LEN {
        Some(FULL_NAME_TOO_SHORT)
    } else {
        None
    }
}

fn confirm_error(password: &str, confirm_password: &str) -> Option<&'static str> {
    if confirm_password.is_empty() {
        Some(CONFIRM_REQUIRED)
    } else if confirm_password != password {
        Some(PASSWORDS_MISMATCH)
    } else {
        None
    }
}

/// Validate sign-in credentials.
#[must_use]
pub fn validate_sign_in(email: &str, password: &str) -> FieldErrors {
    FieldErrors {
        email: email_error(email).map(str::to_owned),
        password: password_error(password).map(str::to_owned),
        ..FieldErrors::default()
    }
}

/// Validate a registration form. Every field is checked independently so the
/// user sees all problems at once.
#[must_use]
pub fn validate_sign_up(email: &str, password: &str, full_name: &str, confirm_password: &str) -> FieldErrors {
    FieldErrors {
        email: email_error(email).map(str::to_owned),
        password: password_error(password).map(str::to_owned),
        full_name: full_name_error(full_name).map(str::to_owned),
        confirm_password: confirm_error(password, confirm_password).map(str::to_owned),
    }
}
