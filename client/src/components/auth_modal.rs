//! Sign-in / sign-up modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the header while a sign-in or sign-up button is active. All
//! behavior lives in `state::auth_modal`; this component only forwards DOM
//! events to it and runs the async submit + success timer.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::auth_modal::{AuthMode, AuthModalState};
use crate::util::validation::FormField;

/// Modal dialog with email/password form and sign-in/sign-up toggle.
///
/// `on_close` fires once for every close path: close button, backdrop,
/// Escape, and the automatic close after a successful submit.
#[component]
pub fn AuthModal(initial_mode: AuthMode, on_close: Callback<()>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let modal = RwSignal::new(AuthModalState::opened(initial_mode));
    let dialog_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = modal.with(|m| m.focus_seq);
        #[cfg(feature = "hydrate")]
        {
            if let Some(dialog) = dialog_ref.get() {
                let _ = dialog.focus();
            }
        }
    });

    let close = move || {
        modal.update(AuthModalState::close);
        on_close.run(());
    };
    let on_backdrop = move |_| close();
    let on_close_click = move |_| close();
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(pending) = modal.try_update(AuthModalState::begin_submit).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::net::api::{HttpAuthApi, submit_auth_request};
            use crate::state::auth_modal::{SUCCESS_CLOSE_DELAY_MS, SubmitTransition};

            let outcome = submit_auth_request(&HttpAuthApi, &pending.request).await;
            if let Err(failure) = &outcome {
                leptos::logging::warn!("auth request failed: {failure}");
            }
            let user = outcome.as_ref().ok().and_then(|s| s.user.clone());
            let transition = modal.try_update(|m| m.finish_submit(pending.ticket, outcome));
            if transition != Some(SubmitTransition::Succeeded) {
                return;
            }
            if let Some(user) = user {
                auth.update(|a| a.signed_in(user));
            }

            gloo_timers::future::sleep(std::time::Duration::from_millis(SUCCESS_CLOSE_DELAY_MS)).await;
            if modal.try_update(|m| m.acknowledge_success(pending.ticket)) == Some(true) {
                let _ = modal.try_update(AuthModalState::close);
                on_close.run(());
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (pending, auth);
        }
    };

    let mode = move || modal.with(|m| m.mode);
    let is_sign_up = move || mode() == AuthMode::SignUp;
    let is_success = move || modal.with(AuthModalState::is_success);
    let submit_disabled = move || modal.with(AuthModalState::submit_disabled);
    let submit_label = move || {
        modal.with(|m| {
            if m.is_submitting() {
                m.mode.pending_label()
            } else {
                m.mode.submit_label()
            }
        })
    };
    let general_error = move || modal.with(|m| m.general_error.clone());
    let toggle_prompt = move || mode().toggle_prompt();

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="dialog dialog--auth"
                node_ref=dialog_ref
                role="dialog"
                aria-modal="true"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <div class="auth-modal__header">
                    <h2>{move || mode().title()}</h2>
                    <button class="auth-modal__close" type="button" on:click=on_close_click title="Close">
                        "✕"
                    </button>
                </div>

                <Show
                    when=move || !is_success()
                    fallback=move || {
                        view! {
                            <div class="auth-modal__success">
                                <p>{move || modal.with(AuthModalState::success_message)}</p>
                            </div>
                        }
                    }
                >
                    <form class="auth-modal__form" on:submit=on_submit novalidate=true>
                        {move || {
                            general_error()
                                .map(|msg| view! { <p class="auth-modal__general-error" role="alert">{msg}</p> })
                        }}

                        <Show when=is_sign_up>
                            <TextField modal=modal field=FormField::FullName label="Full name" input_type="text" autocomplete="name"/>
                        </Show>
                        <TextField modal=modal field=FormField::Email label="Email" input_type="email" autocomplete="email"/>
                        <PasswordField modal=modal field=FormField::Password label="Password"/>
                        <Show when=is_sign_up>
                            <PasswordField modal=modal field=FormField::ConfirmPassword label="Confirm password"/>
                        </Show>

                        <button class="btn btn--primary auth-modal__submit" type="submit" disabled=submit_disabled>
                            {submit_label}
                        </button>
                    </form>

                    <p class="auth-modal__toggle">
                        {move || toggle_prompt().0}
                        " "
                        <button
                            class="auth-modal__toggle-button"
                            type="button"
                            disabled=submit_disabled
                            on:click=move |_| modal.update(AuthModalState::toggle_mode)
                        >
                            {move || toggle_prompt().1}
                        </button>
                    </p>
                </Show>
            </div>
        </div>
    }
}

fn input_class(has_error: bool) -> &'static str {
    if has_error { "auth-modal__input auth-modal__input--error" } else { "auth-modal__input" }
}

fn field_id(field: FormField) -> &'static str {
    match field {
        FormField::Email => "auth-email",
        FormField::Password => "auth-password",
        FormField::FullName => "auth-full-name",
        FormField::ConfirmPassword => "auth-confirm-password",
    }
}

#[component]
fn FieldError(modal: RwSignal<AuthModalState>, field: FormField) -> impl IntoView {
    move || {
        modal
            .with(|m| m.errors.get(field).map(str::to_owned))
            .map(|msg| view! { <p class="auth-modal__field-error">{msg}</p> })
    }
}

#[component]
fn TextField(
    modal: RwSignal<AuthModalState>,
    field: FormField,
    label: &'static str,
    input_type: &'static str,
    autocomplete: &'static str,
) -> impl IntoView {
    let id = field_id(field);
    let has_error = move || modal.with(|m| m.errors.get(field).is_some());
    view! {
        <div class="auth-modal__field">
            <label for=id>{label}</label>
            <input
                id=id
                class=move || input_class(has_error())
                type=input_type
                autocomplete=autocomplete
                prop:value=move || modal.with(|m| m.form.get(field).to_owned())
                on:input=move |ev| modal.update(|m| m.set_field(field, event_target_value(&ev)))
            />
            <FieldError modal=modal field=field/>
        </div>
    }
}

#[component]
fn PasswordField(modal: RwSignal<AuthModalState>, field: FormField, label: &'static str) -> impl IntoView {
    let id = field_id(field);
    let visible = move || {
        modal.with(|m| match field {
            FormField::ConfirmPassword => m.show_confirm_password,
            _ => m.show_password,
        })
    };
    let has_error = move || modal.with(|m| m.errors.get(field).is_some());
    view! {
        <div class="auth-modal__field">
            <label for=id>{label}</label>
            <div class="auth-modal__password">
                <input
                    id=id
                    class=move || input_class(has_error())
                    type=move || if visible() { "text" } else { "password" }
                    autocomplete=move || {
                        if modal.with(|m| m.mode) == AuthMode::SignUp { "new-password" } else { "current-password" }
                    }
                    prop:value=move || modal.with(|m| m.form.get(field).to_owned())
                    on:input=move |ev| modal.update(|m| m.set_field(field, event_target_value(&ev)))
                />
                <button
                    class="auth-modal__visibility"
                    type="button"
                    on:click=move |_| modal.update(|m| m.toggle_password_visibility(field))
                    title=move || if visible() { "Hide password" } else { "Show password" }
                >
                    {move || if visible() { "Hide" } else { "Show" }}
                </button>
            </div>
            <FieldError modal=modal field=field/>
        </div>
    }
}
