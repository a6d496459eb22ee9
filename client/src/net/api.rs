//! REST API helpers for communicating with the auth/profile service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so auth/profile
//! fetch failures degrade UI behavior without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::auth_error::AuthFailure;
#[cfg(any(test, feature = "hydrate"))]
use super::types::ErrorBody;
use super::types::{AuthUser, SignInRequest, SignUpRequest, SignUpResponse};

pub const SIGN_IN_ENDPOINT: &str = "/api/auth/sign-in";
pub const SIGN_UP_ENDPOINT: &str = "/api/auth/sign-up";

/// Turn a non-OK response into an [`AuthFailure`].
///
/// Bodies that are not the standard error envelope keep the status code in
/// the message so the classifier's raw-message fallback is still useful.
#[cfg(any(test, feature = "hydrate"))]
fn failure_from_response(status: u16, body: &str) -> AuthFailure {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => AuthFailure::from_error_body(parsed),
        Err(_) => AuthFailure::remote(None, format!("request failed: {status}")),
    }
}

/// Auth operations the sign-in modal depends on.
///
/// Both calls are plain request/response: they never touch shared state.
/// Callers decide what to do with the returned user.
pub trait AuthApi {
    fn sign_in(&self, request: &SignInRequest) -> impl Future<Output = Result<AuthUser, AuthFailure>>;
    fn sign_up(&self, request: &SignUpRequest) -> impl Future<Output = Result<SignUpResponse, AuthFailure>>;
}

/// Request to submit, built by the modal once validation passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    SignIn(SignInRequest),
    SignUp(SignUpRequest),
}

/// Successful auth result.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSuccess {
    /// Present when a session was established.
    pub user: Option<AuthUser>,
    /// Sign-up succeeded but the email must be confirmed first.
    pub confirmation_required: bool,
}

/// Dispatch one auth request through `api`.
///
/// # Errors
///
/// Returns the [`AuthFailure`] reported by the API.
pub async fn submit_auth_request<A: AuthApi>(api: &A, request: &AuthRequest) -> Result<AuthSuccess, AuthFailure> {
    match request {
        AuthRequest::SignIn(req) => {
            let user = api.sign_in(req).await?;
            Ok(AuthSuccess { user: Some(user), confirmation_required: false })
        }
        AuthRequest::SignUp(req) => {
            let resp = api.sign_up(req).await?;
            let user = (!resp.confirmation_required).then_some(resp.user);
            Ok(AuthSuccess { user, confirmation_required: resp.confirmation_required })
        }
    }
}

/// [`AuthApi`] backed by the server's `/api/auth/*` endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthApi;

impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, request: &SignInRequest) -> Result<AuthUser, AuthFailure> {
        #[cfg(feature = "hydrate")]
        {
            let body: super::types::SignInResponse = post_json(SIGN_IN_ENDPOINT, request).await?;
            Ok(body.user)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(AuthFailure::Transport("not available on server".to_owned()))
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse, AuthFailure> {
        #[cfg(feature = "hydrate")]
        {
            post_json(SIGN_UP_ENDPOINT, request).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(AuthFailure::Transport("not available on server".to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn post_json<T, R>(url: &str, payload: &T) -> Result<R, AuthFailure>
where
    T: serde::Serialize,
    R: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .map_err(|e| AuthFailure::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthFailure::Transport(e.to_string()))?;
    if !resp.ok() {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        return Err(failure_from_response(status, &text));
    }
    resp.json::<R>()
        .await
        .map_err(|e| AuthFailure::Transport(e.to_string()))
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<AuthUser> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<AuthUser>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await;
    }
}
