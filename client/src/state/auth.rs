//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns one `RwSignal<AuthState>` and provides it through context. The
//! auth modal writes the signed-in user into it; the header reads it to pick
//! between sign-in controls and the account menu. Nothing else holds session
//! data.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{AuthUser, Role};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl AuthState {
    /// Initial state before `/api/auth/me` has answered.
    #[must_use]
    pub fn loading() -> Self {
        Self { user: None, loading: true }
    }

    pub fn signed_in(&mut self, user: AuthUser) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn signed_out(&mut self) {
        self.user = None;
        self.loading = false;
    }

    /// Sign-in controls are hidden until the session check finishes.
    #[must_use]
    pub fn show_sign_in_controls(&self) -> bool {
        !self.loading && self.user.is_none()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Admin)
    }

    /// Name shown in the header: full name when set, otherwise the email.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        Some(
            user.full_name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(&user.email),
        )
    }
}
