use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use http::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use http::request::Parts;
use serde_json::Value;
use uuid::Uuid;

use session_guard::{LoginState, Session, SessionError};

use super::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use super::store::{SESSION_STORE, SessionRecord};

/// Session of the current request, available as an Axum extractor
///
/// Extraction never fails: a request without a live session cookie gets a
/// fresh session. Handlers must pass their response through
/// [`finish`](Self::finish) so attribute changes are stored and the session
/// cookie is set or cleared.
///
/// # Example
///
/// ```no_run
/// use axum::{response::Response, routing::get, Router};
/// use session_guard_axum::{AxumRequestContext, GuardSession, IntoResponseError, ViewRegistry, forward_with_guard};
///
/// async fn page(mut session: GuardSession) -> Response {
///     let mut ctx = AxumRequestContext::new(ViewRegistry::new());
///     let result = forward_with_guard(&mut session, &mut ctx, "page")
///         .await
///         .into_response_error();
///     session.finish(result).await
/// }
///
/// let app: Router = Router::new().route("/page", get(page));
/// ```
#[derive(Debug, Clone)]
pub struct GuardSession {
    record: SessionRecord,
    is_new: bool,
    invalidated: bool,
}

impl GuardSession {
    async fn create(now: DateTime<Utc>) -> Self {
        Self {
            record: insert_new_record(now).await,
            is_new: true,
            invalidated: false,
        }
    }

    /// Replace this session with a fresh one under a new id
    ///
    /// The old record and its attributes are discarded, and the creation time
    /// restarts now. Call on login so the new session starts with its own
    /// activity window and a cookie issued before login is no longer valid.
    pub async fn renew(&mut self) {
        if !self.invalidated {
            SESSION_STORE.lock().await.remove(&self.record.id);
        }
        let previous_id = std::mem::take(&mut self.record.id);
        self.record = insert_new_record(Utc::now()).await;
        self.is_new = true;
        self.invalidated = false;
        tracing::debug!("Renewed session {} as {}", previous_id, self.record.id);
    }

    /// Load the session of a request, recording the access
    pub(crate) async fn load(headers: &HeaderMap) -> Self {
        let now = Utc::now();
        let existing = match get_session_id_from_headers(headers) {
            Some(session_id) => {
                SESSION_STORE
                    .lock()
                    .await
                    .touch(session_id, now, *SESSION_COOKIE_MAX_AGE)
            }
            None => None,
        };

        match existing {
            Some(record) => Self {
                record,
                is_new: false,
                invalidated: false,
            },
            None => Self::create(now).await,
        }
    }

    /// Look at the session of a request without recording an access or creating one
    pub(crate) async fn peek(headers: &HeaderMap) -> Option<Self> {
        let session_id = get_session_id_from_headers(headers)?;
        let record = SESSION_STORE
            .lock()
            .await
            .peek(session_id, Utc::now(), *SESSION_COOKIE_MAX_AGE)?;
        Some(Self {
            record,
            is_new: false,
            invalidated: false,
        })
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Store the session and attach its cookie to `response`
    ///
    /// New sessions get a `Set-Cookie` header; invalidated sessions get an
    /// expired one.
    pub async fn finish(self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();

        if self.invalidated {
            append_cookie(response.headers_mut(), "", 0);
            return response;
        }

        let saved = SESSION_STORE
            .lock()
            .await
            .save_attributes(&self.record.id, self.record.attributes);
        if !saved {
            tracing::debug!("Session {} disappeared before it could be saved", self.record.id);
            return response;
        }

        if self.is_new {
            append_cookie(
                response.headers_mut(),
                &self.record.id,
                *SESSION_COOKIE_MAX_AGE as i64,
            );
        }
        response
    }
}

impl<B> FromRequestParts<B> for GuardSession
where
    B: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &B) -> Result<Self, Self::Rejection> {
        Ok(Self::load(&parts.headers).await)
    }
}

#[async_trait]
impl Session for GuardSession {
    fn id(&self) -> &str {
        &self.record.id
    }

    fn creation_time(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    fn last_accessed_time(&self) -> DateTime<Utc> {
        self.record.last_accessed_at
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn login_state(&self) -> Option<LoginState> {
        self.record.attributes.login_state
    }

    fn set_login_state(&mut self, state: LoginState) {
        self.record.attributes.login_state = Some(state);
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.record.attributes.get(key)
    }

    fn set_attribute(&mut self, key: &str, value: Value) {
        self.record.attributes.insert(key, value);
    }

    fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.record.attributes.remove(key)
    }

    async fn invalidate(&mut self) -> Result<(), SessionError> {
        if self.invalidated {
            return Err(SessionError::AlreadyInvalidated);
        }
        SESSION_STORE.lock().await.remove(&self.record.id);
        self.record.attributes.values.clear();
        self.invalidated = true;
        tracing::debug!("Invalidated session {}", self.record.id);
        Ok(())
    }
}

async fn insert_new_record(now: DateTime<Utc>) -> SessionRecord {
    let record = SessionRecord::new(Uuid::new_v4().to_string(), now);
    let mut store = SESSION_STORE.lock().await;
    store.sweep_idle(now, *SESSION_COOKIE_MAX_AGE);
    store.insert(record.clone());
    tracing::debug!("Created session {}", record.id);
    record
}

pub(crate) fn get_session_id_from_headers(headers: &HeaderMap) -> Option<&str> {
    let Some(cookie_header) = headers.get(COOKIE) else {
        tracing::trace!("No cookie header found");
        return None;
    };

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Invalid cookie header: {}", e);
            return None;
        }
    };

    let cookie_name = SESSION_COOKIE_NAME.as_str();
    cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
        let mut parts = s.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(k), Some(v)) if k == cookie_name && !v.is_empty() => Some(v),
            _ => None,
        }
    })
}

fn session_cookie(value: &str, max_age: i64) -> Result<HeaderValue, SessionError> {
    let cookie = format!(
        "{}={value}; SameSite=Lax; Secure; HttpOnly; Path=/; Max-Age={max_age}",
        SESSION_COOKIE_NAME.as_str()
    );
    cookie
        .parse()
        .map_err(|_| SessionError::Cookie("Failed to parse cookie".to_string()))
}

fn append_cookie(headers: &mut HeaderMap, value: &str, max_age: i64) {
    match session_cookie(value, max_age) {
        Ok(cookie) => {
            headers.append(SET_COOKIE, cookie);
        }
        Err(e) => tracing::error!("{}", e),
    }
}
