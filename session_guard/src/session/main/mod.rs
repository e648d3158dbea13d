mod activity;
mod guard;
mod login;

#[cfg(test)]
pub(crate) mod test_utils;

pub use activity::{activity_duration_seconds, is_within_activity_window};
pub use guard::{SessionGuard, forward_to_view, forward_with_guard, forward_with_guard_and_model};
pub use login::{is_logged_in, login_state};
