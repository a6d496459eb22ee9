use super::*;
#[cfg(feature = "live-db-tests")]
use crate::services::test_support::{integration_pool, seed_account};

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token / hash_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

#[test]
fn hash_token_is_stable_sha256_hex() {
    assert_eq!(
        hash_token("abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(hash_token("abc"), hash_token("abc"));
}

#[test]
fn hash_token_differs_from_token() {
    let token = generate_token();
    assert_ne!(hash_token(&token), token);
}

// =============================================================================
// SessionUser
// =============================================================================

fn sample_user(role: Role) -> SessionUser {
    SessionUser {
        id: Uuid::nil(),
        email: "ada@example.com".into(),
        full_name: Some("Ada".into()),
        role,
        avatar_url: None,
    }
}

#[test]
fn session_user_serializes_client_shape() {
    let json = serde_json::to_value(sample_user(Role::Admin)).unwrap();
    assert_eq!(json["email"], "ada@example.com");
    assert_eq!(json["full_name"], "Ada");
    assert_eq!(json["role"], "admin");
    assert!(json["avatar_url"].is_null());
}

#[test]
fn session_user_identity_copies_id_email_role() {
    let identity = sample_user(Role::User).identity();
    assert_eq!(identity.user_id, Uuid::nil());
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.role, Role::User);
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn session_create_validate_delete_round_trip() {
    let pool = integration_pool().await;
    let me = seed_account(&pool, "ada@example.com", Some("Ada")).await;

    let token = create_session(&pool, me.user_id, 1).await.unwrap();
    let user = validate_session(&pool, &token).await.unwrap().expect("session should be valid");
    assert_eq!(user.id, me.user_id);
    assert_eq!(user.full_name.as_deref(), Some("Ada"));

    delete_session(&pool, &token).await.unwrap();
    assert!(validate_session(&pool, &token).await.unwrap().is_none());
}
