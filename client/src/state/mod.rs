//! Client-side state containers.
//!
//! DESIGN
//! ======
//! Plain structs wrapped in `RwSignal`s by the components that own them.
//! Keeping them free of Leptos types keeps every transition unit-testable.

pub mod auth;
pub mod auth_modal;
