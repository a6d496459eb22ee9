//! Top bar with account controls.
//!
//! Shows "Sign in" / "Sign up" while signed out and the user's name with a
//! sign-out button once a session exists. Owns whether the auth modal is
//! mounted and in which mode it opens.

use leptos::prelude::*;

use crate::components::auth_modal::AuthModal;
use crate::state::auth::AuthState;
use crate::state::auth_modal::AuthMode;

#[component]
pub fn SiteHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let modal_mode = RwSignal::new(None::<AuthMode>);

    let on_modal_close = Callback::new(move |()| modal_mode.set(None));

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            auth.update(AuthState::signed_out);
        });
        #[cfg(not(feature = "hydrate"))]
        auth.update(AuthState::signed_out);
    };

    let show_controls = move || auth.with(AuthState::show_sign_in_controls);
    let signed_in = move || auth.with(|a| a.user.is_some());
    let display_name = move || auth.with(|a| a.display_name().map(str::to_owned).unwrap_or_default());

    view! {
        <header class="site-header">
            <a class="site-header__brand" href="/">"EventDesk"</a>
            <nav class="site-header__account">
                <Show when=show_controls>
                    <button class="btn" on:click=move |_| modal_mode.set(Some(AuthMode::SignIn))>
                        "Sign in"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| modal_mode.set(Some(AuthMode::SignUp))>
                        "Sign up"
                    </button>
                </Show>
                <Show when=signed_in>
                    <span class="site-header__user">{display_name}</span>
                    <Show when=move || auth.with(AuthState::is_admin)>
                        <span class="site-header__badge">"Admin"</span>
                    </Show>
                    <button class="btn" on:click=on_sign_out>"Sign out"</button>
                </Show>
            </nav>
        </header>
        {move || {
            modal_mode
                .get()
                .map(|mode| view! { <AuthModal initial_mode=mode on_close=on_modal_close/> })
        }}
    }
}
