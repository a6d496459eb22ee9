//! Access predicates mirroring the row-level security policies.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authoritative checks live in `db/migrations/0004_row_level_security.sql`.
//! Services evaluate the same rules here before opening a transaction so a
//! denied request gets `403` instead of an empty result, and so the rules can
//! be unit-tested without Postgres. Keep both sides in sync.
//!
//! | table           | allowed when                                                     |
//! |-----------------|------------------------------------------------------------------|
//! | `user_profiles` | own row, or caller's profile role is `admin`                     |
//! | `registrations` | own `user_id`, or same email, or registration admin              |
//!
//! A registration admin is a role admin or one of [`RESERVED_ADMIN_EMAILS`].
//! A reserved address counts only once its account email is confirmed; auth
//! refuses to open a session for it before then, so any `Identity` built from
//! a session already satisfies that.

use uuid::Uuid;

use super::profile::Role;
use super::registration::Registration;

/// Addresses treated as admins for registration access regardless of role.
/// Seeded into `reserved_admin_emails` by the RLS migration.
pub const RESERVED_ADMIN_EMAILS: [&str; 2] = ["admin@eventdesk.app", "organizer@eventdesk.app"];

/// Who is making a request, as resolved from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    /// Email on the caller's profile.
    pub email: String,
    pub role: Role,
}

/// Exact, case-sensitive match against the reserved admin addresses.
#[must_use]
pub fn is_reserved_admin_email(email: &str) -> bool {
    RESERVED_ADMIN_EMAILS.contains(&email)
}

impl Identity {
    #[must_use]
    pub fn is_admin_by_role(&self) -> bool {
        self.role == Role::Admin
    }

    #[must_use]
    pub fn is_registration_admin(&self) -> bool {
        self.is_admin_by_role() || is_reserved_admin_email(&self.email)
    }
}

#[must_use]
pub fn can_access_profile(identity: &Identity, profile_id: Uuid) -> bool {
    identity.user_id == profile_id || identity.is_admin_by_role()
}

#[must_use]
pub fn can_access_registration(identity: &Identity, registration: &Registration) -> bool {
    registration.user_id == Some(identity.user_id)
        || registration.email == identity.email
        || identity.is_registration_admin()
}

/// Role changes are admin-only even on the caller's own profile.
#[must_use]
pub fn can_change_role(identity: &Identity) -> bool {
    identity.is_admin_by_role()
}

#[cfg(test)]
#[path = "access_test.rs"]
mod tests;
