//! Landing page.

use leptos::prelude::*;

use crate::components::site_header::SiteHeader;
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let greeting = move || {
        auth.with(|a| match a.display_name() {
            Some(name) => format!("Welcome, {name}."),
            None => "Sign in to register for upcoming events.".to_owned(),
        })
    };

    view! {
        <SiteHeader/>
        <main class="home">
            <h1>"Upcoming events"</h1>
            <p class="home__greeting">{greeting}</p>
        </main>
    }
}
