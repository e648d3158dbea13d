use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::{GuardError, SessionError};
use super::types::LoginState;

/// Session handle supplied by the host framework
///
/// The guard never creates sessions. It reads the timestamps and the login
/// state, and may ask the host to invalidate the session.
#[async_trait]
pub trait Session: Send {
    /// Identifier the host uses for this session
    fn id(&self) -> &str;

    /// When the session was created
    fn creation_time(&self) -> DateTime<Utc>;

    /// When the client last sent a request with this session, not counting
    /// the current one
    fn last_accessed_time(&self) -> DateTime<Utc>;

    /// True until the client has completed a round trip with this session
    fn is_new(&self) -> bool;

    /// The stored login state, `None` when the attribute was never set
    fn login_state(&self) -> Option<LoginState>;

    fn set_login_state(&mut self, state: LoginState);

    fn attribute(&self, key: &str) -> Option<&Value>;

    fn set_attribute(&mut self, key: &str, value: Value);

    fn remove_attribute(&mut self, key: &str) -> Option<Value>;

    /// Destroy all state held by the session
    async fn invalidate(&mut self) -> Result<(), SessionError>;
}

/// Request-side capabilities needed to redirect or forward
#[async_trait]
pub trait RequestContext: Send {
    /// Whatever the host produces for a finished request
    type Output: Send;

    fn set_attribute(&mut self, key: &str, value: Value);

    /// Answer the request with a redirect to `location`
    fn redirect(&mut self, location: &str) -> Self::Output;

    /// Hand the request to `view` without a new client round trip
    async fn forward(&mut self, view: &str) -> Result<Self::Output, GuardError>;
}
