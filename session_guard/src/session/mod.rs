mod errors;
mod main;
mod traits;
mod types;

pub use errors::{GuardError, SessionError};
pub use main::{
    SessionGuard, activity_duration_seconds, forward_to_view, forward_with_guard,
    forward_with_guard_and_model, is_logged_in, is_within_activity_window, login_state,
};
pub use traits::{RequestContext, Session};
pub use types::{LoginState, RequestAttributes, SessionAttributes};

#[cfg(test)]
pub(crate) use main::test_utils;
