use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use session_guard::is_logged_in;

use super::config::GUARD_REDIRECT_ANON;
use super::dispatch::redirect_found;
use super::session::GuardSession;

fn handle_not_logged_in(req: &Request, redirect_on_error: bool) -> Response {
    if redirect_on_error && req.method() == http::Method::GET {
        tracing::debug!("Not logged in, redirecting to {}", GUARD_REDIRECT_ANON.as_str());
        redirect_found(GUARD_REDIRECT_ANON.as_str())
    } else {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}

async fn is_logged_in_from_headers(headers: &HeaderMap) -> bool {
    match GuardSession::peek(headers).await {
        Some(session) => is_logged_in(&session),
        None => false,
    }
}

// Login checker with 401 response
pub async fn require_login_401(req: Request, next: Next) -> Response {
    if is_logged_in_from_headers(req.headers()).await {
        next.run(req).await
    } else {
        handle_not_logged_in(&req, false)
    }
}

// Login checker with redirect
pub async fn require_login_redirect(req: Request, next: Next) -> Response {
    if is_logged_in_from_headers(req.headers()).await {
        next.run(req).await
    } else {
        handle_not_logged_in(&req, true)
    }
}
