use time::OffsetDateTime;

use super::*;

fn identity(email: &str, role: Role) -> Identity {
    Identity { user_id: Uuid::new_v4(), email: email.to_owned(), role }
}

fn registration(user_id: Option<Uuid>, email: &str) -> Registration {
    Registration {
        id: Uuid::new_v4(),
        event_id: Uuid::new_v4(),
        user_id,
        email: email.to_owned(),
        full_name: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

// =============================================================================
// reserved emails / admin flags
// =============================================================================

#[test]
fn reserved_admin_emails_match_exactly() {
    assert!(is_reserved_admin_email("admin@eventdesk.app"));
    assert!(is_reserved_admin_email("organizer@eventdesk.app"));
}

#[test]
fn reserved_admin_email_match_is_case_sensitive_and_untrimmed() {
    assert!(!is_reserved_admin_email("Admin@eventdesk.app"));
    assert!(!is_reserved_admin_email(" admin@eventdesk.app"));
    assert!(!is_reserved_admin_email("admin@eventdesk.app.evil"));
    assert!(!is_reserved_admin_email("ada@example.com"));
}

#[test]
fn role_admin_is_admin_by_role() {
    assert!(identity("boss@example.com", Role::Admin).is_admin_by_role());
    assert!(!identity("ada@example.com", Role::User).is_admin_by_role());
}

#[test]
fn reserved_email_is_registration_admin_but_not_role_admin() {
    let organizer = identity("organizer@eventdesk.app", Role::User);
    assert!(organizer.is_registration_admin());
    assert!(!organizer.is_admin_by_role());
}

#[test]
fn role_admin_is_registration_admin() {
    assert!(identity("boss@example.com", Role::Admin).is_registration_admin());
}

// =============================================================================
// can_access_profile
// =============================================================================

#[test]
fn user_can_access_own_profile() {
    let me = identity("ada@example.com", Role::User);
    assert!(can_access_profile(&me, me.user_id));
}

#[test]
fn user_cannot_access_other_profile() {
    let me = identity("ada@example.com", Role::User);
    assert!(!can_access_profile(&me, Uuid::new_v4()));
}

#[test]
fn admin_can_access_any_profile() {
    let admin = identity("boss@example.com", Role::Admin);
    assert!(can_access_profile(&admin, Uuid::new_v4()));
}

#[test]
fn reserved_email_alone_does_not_grant_profile_access() {
    let organizer = identity("admin@eventdesk.app", Role::User);
    assert!(!can_access_profile(&organizer, Uuid::new_v4()));
}

// =============================================================================
// can_access_registration
// =============================================================================

#[test]
fn owner_by_user_id_can_access_registration() {
    let me = identity("ada@example.com", Role::User);
    let reg = registration(Some(me.user_id), "other@example.com");
    assert!(can_access_registration(&me, &reg));
}

#[test]
fn matching_email_can_access_registration() {
    let me = identity("ada@example.com", Role::User);
    let reg = registration(None, "ada@example.com");
    assert!(can_access_registration(&me, &reg));
}

#[test]
fn stranger_cannot_access_registration() {
    let me = identity("ada@example.com", Role::User);
    let reg = registration(Some(Uuid::new_v4()), "grace@example.com");
    assert!(!can_access_registration(&me, &reg));
}

#[test]
fn email_match_is_exact() {
    let me = identity("ada@example.com", Role::User);
    let reg = registration(None, "ADA@example.com");
    assert!(!can_access_registration(&me, &reg));
}

#[test]
fn role_admin_can_access_any_registration() {
    let admin = identity("boss@example.com", Role::Admin);
    let reg = registration(Some(Uuid::new_v4()), "grace@example.com");
    assert!(can_access_registration(&admin, &reg));
}

#[test]
fn reserved_email_can_access_any_registration() {
    for email in RESERVED_ADMIN_EMAILS {
        let organizer = identity(email, Role::User);
        let reg = registration(Some(Uuid::new_v4()), "grace@example.com");
        assert!(can_access_registration(&organizer, &reg), "expected access for {email}");
    }
}

// =============================================================================
// can_change_role
// =============================================================================

#[test]
fn only_role_admins_change_roles() {
    assert!(can_change_role(&identity("boss@example.com", Role::Admin)));
    assert!(!can_change_role(&identity("ada@example.com", Role::User)));
    assert!(!can_change_role(&identity("admin@eventdesk.app", Role::User)));
}
