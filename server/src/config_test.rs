use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// from_lookup
// =============================================================================

#[test]
fn missing_database_url_is_an_error() {
    let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    assert_eq!(err.to_string(), "DATABASE_URL required");
}

#[test]
fn blank_database_url_is_an_error() {
    let err = ServerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
}

#[test]
fn defaults_apply_when_only_database_url_is_set() {
    let config = ServerConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/eventdesk")])).unwrap();
    assert_eq!(config.database_url, "postgres://localhost/eventdesk");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
    assert!(!config.require_email_confirmation);
    assert!(!config.cookie_secure);
    assert_eq!(config.reconcile_interval_secs, DEFAULT_RECONCILE_INTERVAL_SECS);
}

#[test]
fn explicit_values_override_defaults() {
    let config = ServerConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://db/eventdesk"),
        ("PORT", "8080"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("SESSION_TTL_HOURS", "24"),
        ("AUTH_REQUIRE_EMAIL_CONFIRMATION", "yes"),
        ("COOKIE_SECURE", "on"),
        ("PROFILE_RECONCILE_INTERVAL_SECS", "60"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.db_max_connections, 12);
    assert_eq!(config.session_ttl_hours, 24);
    assert!(config.require_email_confirmation);
    assert!(config.cookie_secure);
    assert_eq!(config.reconcile_interval_secs, 60);
}

#[test]
fn invalid_numbers_fall_back_to_defaults() {
    let config = ServerConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://db/eventdesk"),
        ("PORT", "not-a-port"),
        ("DB_MAX_CONNECTIONS", "-3"),
        ("SESSION_TTL_HOURS", "forever"),
    ]))
    .unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    assert_eq!(config.session_ttl_hours, DEFAULT_SESSION_TTL_HOURS);
}

#[test]
fn invalid_booleans_fall_back_to_false() {
    let config = ServerConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://db/eventdesk"),
        ("AUTH_REQUIRE_EMAIL_CONFIRMATION", "maybe"),
        ("COOKIE_SECURE", ""),
    ]))
    .unwrap();
    assert!(!config.require_email_confirmation);
    assert!(!config.cookie_secure);
}

#[test]
fn zero_intervals_are_clamped_to_one() {
    let config = ServerConfig::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://db/eventdesk"),
        ("SESSION_TTL_HOURS", "0"),
        ("PROFILE_RECONCILE_INTERVAL_SECS", "0"),
    ]))
    .unwrap();
    assert_eq!(config.session_ttl_hours, 1);
    assert_eq!(config.reconcile_interval_secs, 1);
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_accepts_true_and_false_spellings() {
    for val in ["1", "true", "yes", "on", "TRUE", "On", "  yes  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
    for val in ["0", "false", "no", "off", "FALSE", "Off"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_rejects_other_values() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}
