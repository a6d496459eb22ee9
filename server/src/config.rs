//! Server configuration loaded from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` calls [`ServerConfig::from_env`] once after `dotenvy` has loaded any
//! `.env` file. Everything else receives the parsed config through `AppState`
//! and never reads environment variables directly.
//!
//! ERROR HANDLING
//! ==============
//! Only `DATABASE_URL` is mandatory. Every other key falls back to its default
//! when unset or unparseable, so a typo degrades to default behavior instead of
//! refusing to boot.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 336;
pub const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 300;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} required")]
    Missing(&'static str),
}

/// Typed view of the process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Lifetime of a session cookie and its database row.
    pub session_ttl_hours: i64,
    /// New accounts must confirm their email before they can sign in.
    pub require_email_confirmation: bool,
    pub cookie_secure: bool,
    /// How often the maintenance task repairs missing profiles.
    pub reconcile_interval_secs: u64,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            db_max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS),
            session_ttl_hours: parse_or(lookup("SESSION_TTL_HOURS"), DEFAULT_SESSION_TTL_HOURS).max(1),
            require_email_confirmation: lookup("AUTH_REQUIRE_EMAIL_CONFIRMATION")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(false),
            cookie_secure: lookup("COOKIE_SECURE").as_deref().and_then(parse_bool).unwrap_or(false),
            reconcile_interval_secs: parse_or(lookup("PROFILE_RECONCILE_INTERVAL_SECS"), DEFAULT_RECONCILE_INTERVAL_SECS)
                .max(1),
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    raw.and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
