use time::macros::datetime;

use super::*;
use crate::services::profile::Role;
#[cfg(feature = "live-db-tests")]
use crate::services::test_support::{integration_pool, promote_to_admin, seed_account};

fn new_event(title: &str, capacity: Option<i32>) -> NewEvent {
    NewEvent {
        title: title.to_owned(),
        description: None,
        location: Some("Main hall".into()),
        starts_at: datetime!(2026-11-01 18:00 UTC),
        capacity,
    }
}

#[test]
fn valid_event_passes() {
    assert!(validate_new_event(&new_event("Rust meetup", Some(40))).is_ok());
    assert!(validate_new_event(&new_event("Open house", None)).is_ok());
}

#[test]
fn blank_title_is_rejected() {
    assert!(matches!(validate_new_event(&new_event("   ", None)), Err(EventError::Validation(_))));
}

#[test]
fn overlong_title_is_rejected() {
    let title = "x".repeat(MAX_TITLE_LEN + 1);
    assert!(matches!(validate_new_event(&new_event(&title, None)), Err(EventError::Validation(_))));
}

#[test]
fn non_positive_capacity_is_rejected() {
    assert!(matches!(validate_new_event(&new_event("Meetup", Some(0))), Err(EventError::Validation(_))));
    assert!(matches!(validate_new_event(&new_event("Meetup", Some(-5))), Err(EventError::Validation(_))));
}

#[test]
fn new_event_parses_rfc3339_start() {
    let event: NewEvent =
        serde_json::from_str(r#"{"title":"Meetup","starts_at":"2026-11-01T18:00:00Z","capacity":10}"#).unwrap();
    assert_eq!(event.starts_at, datetime!(2026-11-01 18:00 UTC));
    assert_eq!(event.capacity, Some(10));
    assert_eq!(event.description, None);
}

#[test]
fn new_event_rejects_non_rfc3339_start() {
    assert!(serde_json::from_str::<NewEvent>(r#"{"title":"Meetup","starts_at":"next friday"}"#).is_err());
}

#[tokio::test]
async fn non_admin_cannot_create_event() {
    let state = crate::state::test_helpers::test_app_state();
    let user = Identity { user_id: Uuid::new_v4(), email: "ada@example.com".into(), role: Role::User };
    let err = create_event(&state.pool, &user, &new_event("Meetup", None)).await.unwrap_err();
    assert!(matches!(err, EventError::Forbidden));
}

#[tokio::test]
async fn reserved_email_alone_cannot_create_event() {
    let state = crate::state::test_helpers::test_app_state();
    let organizer = Identity { user_id: Uuid::new_v4(), email: "organizer@eventdesk.app".into(), role: Role::User };
    let err = create_event(&state.pool, &organizer, &new_event("Meetup", None)).await.unwrap_err();
    assert!(matches!(err, EventError::Forbidden));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn admin_creates_event_and_everyone_lists_it() {
    let pool = integration_pool().await;
    let admin = promote_to_admin(&pool, seed_account(&pool, "boss@example.com", None).await).await;
    let user = seed_account(&pool, "ada@example.com", None).await;

    let created = create_event(&pool, &admin, &new_event("Rust meetup", Some(2))).await.unwrap();
    assert_eq!(created.created_by, Some(admin.user_id));

    let listed = list_events(&pool, &user).await.unwrap();
    assert!(listed.iter().any(|e| e.id == created.id && e.title == "Rust meetup"));
}
