//! Database initialization, migration runner and identity-scoped transactions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool and enforce schema
//! migrations before accepting API traffic.
//!
//! ROW-LEVEL SECURITY
//! ==================
//! The pool connects as the schema owner, which is not subject to RLS. Reads
//! and writes made on behalf of a signed-in user go through [`begin_as`], which
//! drops to the `eventdesk_app` role and records the caller's id in
//! `app.current_user_id` for the remainder of the transaction. Policies read
//! that setting through `current_user_id()`.

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::config::ServerConfig;

/// Switches to the role the RLS policies are written against.
const SET_APP_ROLE: &str = "SET LOCAL ROLE eventdesk_app";

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(config: &ServerConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

/// Open a transaction that runs as `user_id` under row-level security.
///
/// Both settings are transaction-local, so the connection goes back to the
/// pool clean on commit or rollback.
///
/// # Errors
///
/// Returns an error if the transaction cannot be started or the role switch
/// is refused.
pub async fn begin_as(pool: &PgPool, user_id: Uuid) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(SET_APP_ROLE).execute(&mut *tx).await?;
    sqlx::query("SELECT set_config('app.current_user_id', $1, true)")
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
