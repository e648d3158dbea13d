//! session_guard - Login-state and inactivity checks for web request handlers
//!
//! This crate decides whether a session is logged in and whether it is still
//! inside its activity window, and forwards requests to views only when it is.
//! Sessions and request dispatch are supplied by the host framework through the
//! [`Session`] and [`RequestContext`] traits.

mod config;
mod session;

pub use config::{
    BEAN_ATTRIBUTE, GUARD_LOGOUT_URL, GUARD_MAX_INACTIVITY_MINUTES, GuardConfig, STATE_ATTRIBUTE,
};

pub use session::{
    GuardError, LoginState, RequestAttributes, RequestContext, Session, SessionAttributes,
    SessionError, SessionGuard, activity_duration_seconds, forward_to_view, forward_with_guard,
    forward_with_guard_and_model, is_logged_in, is_within_activity_window, login_state,
};

#[cfg(test)]
pub(crate) use session::test_utils;
