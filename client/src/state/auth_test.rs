use super::*;

fn user(full_name: Option<&str>, role: Role) -> AuthUser {
    AuthUser {
        id: "u1".to_owned(),
        email: "ada@example.com".to_owned(),
        full_name: full_name.map(str::to_owned),
        role,
        avatar_url: None,
    }
}

#[test]
fn default_state_is_signed_out_and_idle() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert!(state.show_sign_in_controls());
}

#[test]
fn loading_state_hides_sign_in_controls() {
    let state = AuthState::loading();
    assert!(!state.show_sign_in_controls());
}

#[test]
fn signed_in_sets_user_and_stops_loading() {
    let mut state = AuthState::loading();
    state.signed_in(user(Some("Ada"), Role::User));
    assert!(!state.loading);
    assert!(!state.show_sign_in_controls());
    assert_eq!(state.display_name(), Some("Ada"));
}

#[test]
fn signed_out_clears_user() {
    let mut state = AuthState::default();
    state.signed_in(user(None, Role::User));
    state.signed_out();
    assert!(state.user.is_none());
    assert!(state.show_sign_in_controls());
}

#[test]
fn display_name_falls_back_to_email() {
    let mut state = AuthState::default();
    state.signed_in(user(Some("  "), Role::User));
    assert_eq!(state.display_name(), Some("ada@example.com"));
}

#[test]
fn is_admin_follows_role() {
    let mut state = AuthState::default();
    assert!(!state.is_admin());
    state.signed_in(user(None, Role::Admin));
    assert!(state.is_admin());
}
