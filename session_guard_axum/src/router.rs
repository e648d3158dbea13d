//! Router for the endpoints owned by the guard

use axum::{Router, routing::get};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use session_guard::GUARD_LOGOUT_URL;

use super::pages::logout;

/// Create a router serving the logout endpoint
///
/// The endpoint is mounted at `GUARD_LOGOUT_URL` (default "/logout"), the
/// same URL expired sessions are redirected to. Merge it into the
/// application router.
pub fn guard_router() -> Router {
    guard_router_no_trace().layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as `guard_router()` but without the HTTP tracing middleware
pub fn guard_router_no_trace() -> Router {
    Router::new().route(GUARD_LOGOUT_URL.as_str(), get(logout))
}
