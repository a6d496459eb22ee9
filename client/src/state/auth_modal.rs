//! Sign-in / sign-up modal state machine.
//!
//! DESIGN
//! ======
//! Pure state with no Leptos types so every transition is unit-testable.
//! The component owns one `RwSignal<AuthModalState>` and drives it:
//!
//! ```text
//! Closed --open(mode)--> Open --begin_submit--> Submitting
//!   ^                     ^  \                    |   |
//!   |                     |   `- invalid form     |   `- failure --> Open
//!   |                     |      stays Open       `- success --> Success
//!   `------ close() from any phase (resets everything) <-----------'
//! ```
//!
//! Each lifecycle (open..close) has a ticket number. Async results and the
//! success timer carry the ticket they were started with; once the modal is
//! closed the ticket is stale and late results are dropped.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use crate::net::api::{AuthRequest, AuthSuccess};
use crate::net::auth_error::{AuthFailure, FormError, classify};
use crate::net::types::{SignInRequest, SignUpRequest};
use crate::util::validation::{FieldErrors, FormField, validate_sign_in, validate_sign_up};

/// How long the success panel stays up before the modal closes itself.
pub const SUCCESS_CLOSE_DELAY_MS: u64 = 1500;

/// Which form the modal shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    #[must_use]
    pub fn pending_label(self) -> &'static str {
        match self {
            Self::SignIn => "Signing in...",
            Self::SignUp => "Creating account...",
        }
    }

    #[must_use]
    pub fn toggle_prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::SignIn => ("Don't have an account?", "Sign up"),
            Self::SignUp => ("Already have an account?", "Sign in"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    Submitting,
    Success,
}

/// Raw input values, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub confirm_password: String,
}

impl AuthForm {
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::FullName => &self.full_name,
            FormField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            FormField::FullName => self.full_name = value,
            FormField::ConfirmPassword => self.confirm_password = value,
        }
    }
}

/// Identifies the lifecycle a submission belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// A validated request ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmit {
    pub ticket: SubmitTicket,
    pub request: AuthRequest,
}

/// What `finish_submit` did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitTransition {
    /// The modal moved on (closed or reset); the result was dropped.
    Stale,
    /// Back to the editable form with an error shown.
    Failed,
    /// Now showing the success panel.
    Succeeded,
}

/// Full transient state of the auth modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthModalState {
    pub phase: ModalPhase,
    pub mode: AuthMode,
    initial_mode: AuthMode,
    pub form: AuthForm,
    pub errors: FieldErrors,
    pub general_error: Option<String>,
    pub show_password: bool,
    pub show_confirm_password: bool,
    /// Set once sign-up finished but the email still needs confirming.
    pub confirmation_required: bool,
    /// Bumped on every open; the component moves focus into the dialog when
    /// it changes so Escape reaches it without a click first.
    pub focus_seq: u64,
    lifecycle: u64,
    success_acknowledged: bool,
}

impl AuthModalState {
    /// A state already opened in `mode`.
    #[must_use]
    pub fn opened(mode: AuthMode) -> Self {
        let mut state = Self::default();
        state.open(mode);
        state
    }

    /// Show the modal in `initial_mode`. Re-opening starts a fresh lifecycle.
    pub fn open(&mut self, initial_mode: AuthMode) {
        self.reset_transient();
        self.initial_mode = initial_mode;
        self.mode = initial_mode;
        self.phase = ModalPhase::Open;
        self.focus_seq = self.focus_seq.saturating_add(1);
    }

    /// Close from any phase, dropping everything typed and any in-flight result.
    pub fn close(&mut self) {
        self.reset_transient();
        self.mode = self.initial_mode;
        self.phase = ModalPhase::Closed;
    }

    /// Switch between sign-in and sign-up. Keeps only the email.
    pub fn toggle_mode(&mut self) {
        if self.phase != ModalPhase::Open {
            return;
        }
        self.mode = self.mode.toggled();
        self.form.password.clear();
        self.form.confirm_password.clear();
        self.form.full_name.clear();
        self.errors = FieldErrors::default();
        self.general_error = None;
        self.show_password = false;
        self.show_confirm_password = false;
    }

    /// Store an edited value and clear that field's error.
    pub fn set_field(&mut self, field: FormField, value: String) {
        if self.phase == ModalPhase::Closed {
            return;
        }
        self.form.set(field, value);
        self.errors.clear(field);
    }

    pub fn toggle_password_visibility(&mut self, field: FormField) {
        match field {
            FormField::Password => self.show_password = !self.show_password,
            FormField::ConfirmPassword => self.show_confirm_password = !self.show_confirm_password,
            FormField::Email | FormField::FullName => {}
        }
    }

    /// Validate and, if the form is clean, move to `Submitting`.
    ///
    /// Returns `None` when nothing should be sent: the form is invalid (field
    /// errors are now populated) or a request is already in flight.
    pub fn begin_submit(&mut self) -> Option<PendingSubmit> {
        if self.phase != ModalPhase::Open {
            return None;
        }
        self.general_error = None;

        let errors = match self.mode {
            AuthMode::SignIn => validate_sign_in(&self.form.email, &self.form.password),
            AuthMode::SignUp => validate_sign_up(
                &self.form.email,
                &self.form.password,
                &self.form.full_name,
                &self.form.confirm_password,
            ),
        };
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors = FieldErrors::default();
        self.phase = ModalPhase::Submitting;

        let email = self.form.email.trim().to_owned();
        let request = match self.mode {
            AuthMode::SignIn => AuthRequest::SignIn(SignInRequest { email, password: self.form.password.clone() }),
            AuthMode::SignUp => AuthRequest::SignUp(SignUpRequest {
                email,
                password: self.form.password.clone(),
                full_name: self.form.full_name.trim().to_owned(),
            }),
        };
        Some(PendingSubmit { ticket: self.ticket(), request })
    }

    /// Apply the result of a submission started with `ticket`.
    pub fn finish_submit(&mut self, ticket: SubmitTicket, outcome: Result<AuthSuccess, AuthFailure>) -> SubmitTransition {
        if ticket != self.ticket() || self.phase != ModalPhase::Submitting {
            return SubmitTransition::Stale;
        }
        match outcome {
            Ok(success) => {
                self.phase = ModalPhase::Success;
                self.confirmation_required = success.confirmation_required;
                SubmitTransition::Succeeded
            }
            Err(failure) => {
                self.phase = ModalPhase::Open;
                match classify(&failure) {
                    FormError::General(message) => self.general_error = Some(message),
                    FormError::Field(field, message) => self.errors.set(field, message),
                }
                SubmitTransition::Failed
            }
        }
    }

    /// Called when the success delay elapses. Returns `true` exactly once per
    /// successful lifecycle; the caller then closes the modal.
    pub fn acknowledge_success(&mut self, ticket: SubmitTicket) -> bool {
        if ticket != self.ticket() || self.phase != ModalPhase::Success || self.success_acknowledged {
            return false;
        }
        self.success_acknowledged = true;
        true
    }

    #[must_use]
    pub fn ticket(&self) -> SubmitTicket {
        SubmitTicket(self.lifecycle)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == ModalPhase::Submitting
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.phase == ModalPhase::Success
    }

    /// Submit control is disabled while a request is out or after success.
    #[must_use]
    pub fn submit_disabled(&self) -> bool {
        matches!(self.phase, ModalPhase::Submitting | ModalPhase::Success)
    }

    #[must_use]
    pub fn success_message(&self) -> &'static str {
        match (self.mode, self.confirmation_required) {
            (AuthMode::SignIn, _) => "Welcome back! You're signed in.",
            (AuthMode::SignUp, false) => "Account created! You're signed in.",
            (AuthMode::SignUp, true) => "Account created! Check your email to confirm your address.",
        }
    }

    fn reset_transient(&mut self) {
        self.form = AuthForm::default();
        self.errors = FieldErrors::default();
        self.general_error = None;
        self.show_password = false;
        self.show_confirm_password = false;
        self.confirmation_required = false;
        self.success_acknowledged = false;
        self.lifecycle = self.lifecycle.wrapping_add(1);
    }
}
