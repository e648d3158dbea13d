use crate::session::traits::Session;
use crate::session::types::LoginState;

/// Login state of the session, treating a missing attribute as `NotLoggedIn`
pub fn login_state<S: Session + ?Sized>(session: &S) -> LoginState {
    session.login_state().unwrap_or_default()
}

/// Check if the session is marked as logged in
///
/// # Arguments
/// * `session` - The session to inspect
///
/// # Returns
/// * `bool` - True only when the login state is `LoggedIn`
pub fn is_logged_in<S: Session + ?Sized>(session: &S) -> bool {
    login_state(session) == LoginState::LoggedIn
}
