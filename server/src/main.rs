#![recursion_limit = "256"]

mod config;
mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let port = config.port;

    let pool = db::init_pool(&config)
        .await
        .expect("database init failed");

    if config.require_email_confirmation {
        tracing::info!("email confirmation required for new accounts");
    }

    let state = state::AppState::new(pool, config);

    // Spawn background profile reconciliation + session purge.
    let _maintenance = services::reconcile::spawn_maintenance_task(state.clone());

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "Leptos SSR unavailable; serving API only");
            routes::api_routes(state)
        }
    };
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "eventdesk listening");
    axum::serve(listener, app).await.expect("server failed");
}
