use crate::session::traits::Session;

const MILLIS_PER_SECOND: i64 = 1000;
const SECONDS_PER_MINUTE: i64 = 60;

/// Whole seconds between two millisecond timestamps
///
/// Uses integer division, so partial seconds are truncated toward zero.
pub fn activity_duration_seconds(start_ms: i64, end_ms: i64) -> i64 {
    (end_ms - start_ms) / MILLIS_PER_SECOND
}

/// Check whether the session is still inside its activity window
///
/// A new session always passes. Otherwise the time from session creation to
/// its last access is truncated to whole minutes and must be strictly less
/// than `max_minutes`.
///
/// # Arguments
/// * `session` - The session to check
/// * `max_minutes` - Size of the window in minutes
///
/// # Returns
/// * `bool` - True if the session may proceed
pub fn is_within_activity_window<S: Session + ?Sized>(session: &S, max_minutes: i64) -> bool {
    if session.is_new() {
        return true;
    }

    // Measures session lifetime (creation -> last access), not idle time since the last request.
    let elapsed_seconds = activity_duration_seconds(
        session.creation_time().timestamp_millis(),
        session.last_accessed_time().timestamp_millis(),
    );
    elapsed_seconds / SECONDS_PER_MINUTE < max_minutes
}
