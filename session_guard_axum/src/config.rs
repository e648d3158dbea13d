//! Configuration for the axum integration

use std::sync::LazyLock;

const DEFAULT_SESSION_COOKIE_MAX_AGE: u64 = 3600;

/// Browsers cap cookie lifetimes at 400 days
const MAX_SESSION_COOKIE_MAX_AGE: u64 = 400 * 24 * 60 * 60;

/// Name of the cookie carrying the session id
/// Default: "__Host-SessionId"
pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("__Host-SessionId".to_string())
});

/// Seconds a session may go without any request before it is discarded
/// Default: 3600
pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    parse_cookie_max_age(std::env::var("SESSION_COOKIE_MAX_AGE").ok().as_deref())
});

/// Where anonymous users are sent by the redirecting middleware and after logout
/// Default: "/"
pub static GUARD_REDIRECT_ANON: LazyLock<String> =
    LazyLock::new(|| parse_redirect_anon(std::env::var("GUARD_REDIRECT_ANON").ok().as_deref()));

fn parse_cookie_max_age(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_SESSION_COOKIE_MAX_AGE)
        .min(MAX_SESSION_COOKIE_MAX_AGE)
}

fn parse_redirect_anon(value: Option<&str>) -> String {
    value
        .map(|s| s.to_string())
        .unwrap_or_else(|| "/".to_string())
}
