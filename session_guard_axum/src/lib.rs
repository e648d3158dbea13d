//! session_guard_axum - Axum integration for session_guard
//!
//! Supplies the host side of the guard: cookie-backed sessions with
//! creation and last-access tracking, in-process forwarding to views, a
//! login-required middleware and the logout endpoint.

mod config;
mod dispatch;
mod error;
mod middleware;
mod pages;
mod router;
mod session;
mod store;

pub use config::{GUARD_REDIRECT_ANON, SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use dispatch::{AxumRequestContext, ViewRegistry, ViewRenderer};
pub use error::IntoResponseError;
pub use middleware::{require_login_401, require_login_redirect};
pub use router::{guard_router, guard_router_no_trace};
pub use session::GuardSession;

// Re-export the guard operations so handlers only need this crate
pub use session_guard::{
    BEAN_ATTRIBUTE, GUARD_LOGOUT_URL, GUARD_MAX_INACTIVITY_MINUTES, GuardConfig, GuardError,
    LoginState, RequestAttributes, RequestContext, Session, SessionError, SessionGuard,
    forward_to_view, forward_with_guard, forward_with_guard_and_model, is_logged_in,
    is_within_activity_window, login_state,
};
