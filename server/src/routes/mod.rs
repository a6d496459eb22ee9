//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and stitches it with Leptos SSR rendering
//! under a single Axum router. The landing page and auth modal are rendered
//! by the `client` crate; compiled WASM/CSS assets are served from `/pkg`.

pub mod auth;
pub mod error;
pub mod events;
pub mod profiles;
pub mod registrations;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/confirm", get(auth::confirm_email))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route(
            "/api/profiles/{id}",
            get(profiles::get_profile).patch(profiles::update_profile),
        )
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/{id}/registrations", post(registrations::register_for_event))
        .route("/api/registrations", get(registrations::list_registrations))
        .route("/api/registrations/{id}", delete(registrations::cancel_registration))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR app + static assets under `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
