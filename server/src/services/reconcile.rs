//! Maintenance task — repair missing profiles and purge expired sessions.
//!
//! DESIGN
//! ======
//! `handle_new_user` is fail-open: if the profile insert errors, the account
//! is still created and the trigger only raises a warning. This task closes
//! that gap by periodically inserting a default profile for every account
//! without one, logging how many it repaired at `warn`.
//!
//! ERROR HANDLING
//! ==============
//! A failed pass is logged and retried on the next tick; the task never
//! exits on its own.

use std::time::Duration;

use sqlx::PgPool;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::session;
use crate::state::AppState;

/// Insert default profiles for accounts that have none. Returns the number
/// of profiles created.
pub async fn reconcile_profiles(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r"INSERT INTO user_profiles (id, email, full_name)
          SELECT a.id, a.email, NULLIF(btrim(a.full_name), '')
          FROM auth_users a
          LEFT JOIN user_profiles p ON p.id = a.id
          WHERE p.id IS NULL
          ON CONFLICT (id) DO NOTHING",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// One maintenance pass.
pub async fn run_maintenance(pool: &PgPool) {
    match reconcile_profiles(pool).await {
        Ok(0) => {}
        Ok(repaired) => warn!(repaired, "created missing user profiles for orphaned accounts"),
        Err(e) => error!(error = %e, "profile reconciliation failed"),
    }
    match session::purge_expired_sessions(pool).await {
        Ok(0) => {}
        Ok(purged) => info!(purged, "purged expired sessions"),
        Err(e) => error!(error = %e, "session purge failed"),
    }
}

/// Spawn the background maintenance task. Returns a handle for shutdown.
pub fn spawn_maintenance_task(state: AppState) -> JoinHandle<()> {
    let interval_secs = state.config.reconcile_interval_secs;
    info!(interval_secs, "profile reconciliation configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            run_maintenance(&state.pool).await;
        }
    })
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
