use super::*;
#[cfg(feature = "live-db-tests")]
use crate::services::test_support::{integration_pool, seed_account};

fn identity(role: Role) -> Identity {
    Identity { user_id: Uuid::new_v4(), email: "ada@example.com".into(), role }
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(serde_json::from_str::<Role>(r#""user""#).unwrap(), Role::User);
}

#[test]
fn role_defaults_to_user() {
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn role_from_db_treats_unknown_as_user() {
    assert_eq!(Role::from_db("admin"), Role::Admin);
    assert_eq!(Role::from_db("user"), Role::User);
    assert_eq!(Role::from_db("superuser"), Role::User);
}

#[test]
fn role_as_str_matches_check_constraint_values() {
    assert_eq!(Role::User.as_str(), "user");
    assert_eq!(Role::Admin.as_str(), "admin");
}

// =============================================================================
// ProfileUpdate
// =============================================================================

#[test]
fn profile_update_missing_fields_deserialize_as_none() {
    let update: ProfileUpdate = serde_json::from_str(r#"{"full_name":"Ada Lovelace"}"#).unwrap();
    assert_eq!(update.full_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(update.avatar_url, None);
    assert_eq!(update.role, None);
    assert!(!update.is_empty());
    assert!(ProfileUpdate::default().is_empty());
}

#[test]
fn profile_update_rejects_unknown_role() {
    assert!(serde_json::from_str::<ProfileUpdate>(r#"{"role":"owner"}"#).is_err());
}

// =============================================================================
// check_update
// =============================================================================

#[test]
fn owner_may_edit_name_and_avatar() {
    let me = identity(Role::User);
    let update = ProfileUpdate {
        full_name: Some("Ada Lovelace".into()),
        avatar_url: Some("https://example.com/ada.png".into()),
        role: None,
    };
    assert!(check_update(&me, me.user_id, &update).is_ok());
}

#[test]
fn owner_may_not_change_own_role() {
    let me = identity(Role::User);
    let update = ProfileUpdate { role: Some(Role::Admin), ..ProfileUpdate::default() };
    assert!(matches!(check_update(&me, me.user_id, &update), Err(ProfileError::RoleChangeForbidden)));
}

#[test]
fn non_admin_may_not_edit_other_profile() {
    let me = identity(Role::User);
    let other = Uuid::new_v4();
    let update = ProfileUpdate { full_name: Some("Grace".into()), ..ProfileUpdate::default() };
    assert!(matches!(check_update(&me, other, &update), Err(ProfileError::Forbidden(id)) if id == other));
}

#[test]
fn admin_may_change_any_role() {
    let admin = identity(Role::Admin);
    let update = ProfileUpdate { role: Some(Role::Admin), ..ProfileUpdate::default() };
    assert!(check_update(&admin, Uuid::new_v4(), &update).is_ok());
}

#[test]
fn short_full_name_is_rejected() {
    let me = identity(Role::User);
    let update = ProfileUpdate { full_name: Some("  A ".into()), ..ProfileUpdate::default() };
    assert!(matches!(check_update(&me, me.user_id, &update), Err(ProfileError::Validation(_))));
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn account_insert_creates_profile_and_updates_touch_timestamp() {
    let pool = integration_pool().await;
    let me = seed_account(&pool, "ada@example.com", Some("Ada")).await;

    let profile = get_profile(&pool, &me, me.user_id).await.expect("profile should exist");
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.full_name.as_deref(), Some("Ada"));
    assert_eq!(profile.role, Role::User);

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let update = ProfileUpdate { full_name: Some("Ada Lovelace".into()), ..ProfileUpdate::default() };
    let updated = update_profile(&pool, &me, me.user_id, &update).await.expect("update should succeed");
    assert_eq!(updated.full_name.as_deref(), Some("Ada Lovelace"));
    assert!(updated.updated_at > profile.updated_at);
    assert_eq!(updated.created_at, profile.created_at);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn rls_hides_other_profiles_from_non_admins() {
    let pool = integration_pool().await;
    let me = seed_account(&pool, "ada@example.com", None).await;
    let other = seed_account(&pool, "grace@example.com", None).await;

    let mut tx = crate::db::begin_as(&pool, me.user_id).await.unwrap();
    let visible: Option<Uuid> = sqlx::query_scalar("SELECT id FROM user_profiles WHERE id = $1")
        .bind(other.user_id)
        .fetch_optional(&mut *tx)
        .await
        .unwrap();
    tx.rollback().await.unwrap();
    assert_eq!(visible, None);
}
