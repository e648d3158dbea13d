//! Central configuration for the session_guard crate

use std::sync::LazyLock;

/// Request attribute under which a forwarded view finds its model
pub const BEAN_ATTRIBUTE: &str = "bean";

/// Session attribute holding the [`LoginState`](crate::LoginState)
pub const STATE_ATTRIBUTE: &str = "state";

const DEFAULT_MAX_INACTIVITY_MINUTES: i64 = 15;
const DEFAULT_LOGOUT_URL: &str = "/logout";

/// Maximum allowed activity time of a session, in minutes
/// Default: 15
pub static GUARD_MAX_INACTIVITY_MINUTES: LazyLock<i64> = LazyLock::new(|| {
    parse_max_inactivity_minutes(std::env::var("GUARD_MAX_INACTIVITY_MINUTES").ok().as_deref())
});

/// Where expired sessions are redirected
/// Default: "/logout"
pub static GUARD_LOGOUT_URL: LazyLock<String> =
    LazyLock::new(|| parse_logout_url(std::env::var("GUARD_LOGOUT_URL").ok().as_deref()));

fn parse_max_inactivity_minutes(value: Option<&str>) -> i64 {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_MAX_INACTIVITY_MINUTES)
}

/// The logout URL doubles as a route path, so it must start with '/'
fn parse_logout_url(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(url) if url.starts_with('/') => url.to_string(),
        Some(url) => {
            tracing::warn!("Ignoring GUARD_LOGOUT_URL {:?}, it must start with '/'", url);
            DEFAULT_LOGOUT_URL.to_string()
        }
        None => DEFAULT_LOGOUT_URL.to_string(),
    }
}

/// Settings used by [`SessionGuard`](crate::SessionGuard)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// Sessions whose activity time reaches this many minutes are expired
    pub max_inactivity_minutes: i64,
    /// Redirect target for expired sessions
    pub logout_url: String,
}

impl GuardConfig {
    /// Build the configuration from the environment-backed statics
    pub fn from_env() -> Self {
        Self {
            max_inactivity_minutes: *GUARD_MAX_INACTIVITY_MINUTES,
            logout_url: GUARD_LOGOUT_URL.clone(),
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_inactivity_minutes: DEFAULT_MAX_INACTIVITY_MINUTES,
            logout_url: DEFAULT_LOGOUT_URL.to_string(),
        }
    }
}
