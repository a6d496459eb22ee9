use super::*;

#[test]
fn role_defaults_to_user() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Admin).unwrap(), serde_json::json!("admin"));
    assert_eq!(serde_json::to_value(Role::User).unwrap(), serde_json::json!("user"));
}

#[test]
fn role_rejects_unknown_value() {
    assert!(serde_json::from_value::<Role>(serde_json::json!("owner")).is_err());
}

#[test]
fn auth_user_missing_role_defaults_to_user() {
    let user: AuthUser = serde_json::from_value(serde_json::json!({
        "id": "u1",
        "email": "a@example.com",
        "full_name": null,
        "avatar_url": null
    }))
    .unwrap();
    assert_eq!(user.role, Role::User);
    assert_eq!(user.full_name, None);
}

#[test]
fn sign_up_response_confirmation_flag_defaults_false() {
    let resp: SignUpResponse = serde_json::from_value(serde_json::json!({
        "user": {
            "id": "u1",
            "email": "a@example.com",
            "full_name": "Ada",
            "role": "user",
            "avatar_url": null
        }
    }))
    .unwrap();
    assert!(!resp.confirmation_required);
    assert_eq!(resp.user.full_name.as_deref(), Some("Ada"));
}

#[test]
fn error_body_parses_without_code() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":{"message":"boom"}}"#).unwrap();
    assert_eq!(body.error.code, None);
    assert_eq!(body.error.message, "boom");
}

#[test]
fn sign_up_request_uses_snake_case_full_name() {
    let req = SignUpRequest {
        email: "a@example.com".to_owned(),
        password: "abcdef".to_owned(),
        full_name: "Ada".to_owned(),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["full_name"], "Ada");
}
