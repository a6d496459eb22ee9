//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read/write shared state from Leptos context providers set up in
//! `app::App`.

pub mod auth_modal;
pub mod site_header;
