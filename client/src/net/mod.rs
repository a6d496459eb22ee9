//! Networking modules for the auth HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs REST calls, `auth_error` maps failures onto the form, and
//! `types` defines the shared wire schema.

pub mod api;
pub mod auth_error;
pub mod types;
