//! Test utilities for session module tests

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::session::errors::{GuardError, SessionError};
use crate::session::traits::{RequestContext, Session};
use crate::session::types::{LoginState, RequestAttributes, SessionAttributes};

/// Fixed point in time, offset by `seconds`
pub(crate) fn timestamp(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0)
        .single()
        .expect("valid test timestamp")
}

/// In-memory session with settable timestamps
#[derive(Debug, Clone)]
pub(crate) struct MockSession {
    pub(crate) id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) last_accessed_at: DateTime<Utc>,
    pub(crate) is_new: bool,
    pub(crate) attributes: SessionAttributes,
    pub(crate) invalidated: bool,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self {
            id: "mock-session".to_string(),
            created_at: timestamp(0),
            last_accessed_at: timestamp(0),
            is_new: true,
            attributes: SessionAttributes::default(),
            invalidated: false,
        }
    }

    pub(crate) fn with_times(mut self, created: DateTime<Utc>, accessed: DateTime<Utc>) -> Self {
        self.created_at = created;
        self.last_accessed_at = accessed;
        self
    }

    pub(crate) fn with_is_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    pub(crate) fn with_login_state(mut self, state: LoginState) -> Self {
        self.attributes.login_state = Some(state);
        self
    }

    pub(crate) fn invalidated(mut self) -> Self {
        self.invalidated = true;
        self
    }
}

#[async_trait]
impl Session for MockSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn creation_time(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn last_accessed_time(&self) -> DateTime<Utc> {
        self.last_accessed_at
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn login_state(&self) -> Option<LoginState> {
        self.attributes.login_state
    }

    fn set_login_state(&mut self, state: LoginState) {
        self.attributes.login_state = Some(state);
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn set_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key, value);
    }

    fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    async fn invalidate(&mut self) -> Result<(), SessionError> {
        if self.invalidated {
            return Err(SessionError::AlreadyInvalidated);
        }
        self.invalidated = true;
        self.attributes.values.clear();
        Ok(())
    }
}

/// What the mock request context was asked to do
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MockOutcome {
    Redirect(String),
    Forward {
        view: String,
        attributes: RequestAttributes,
    },
}

/// Request context recording redirects and forwards
#[derive(Debug, Default)]
pub(crate) struct MockRequestContext {
    pub(crate) attributes: RequestAttributes,
    pub(crate) missing_views: HashSet<String>,
    pub(crate) forwards: usize,
    pub(crate) redirects: usize,
}

impl MockRequestContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_missing_view(mut self, view: &str) -> Self {
        self.missing_views.insert(view.to_string());
        self
    }
}

#[async_trait]
impl RequestContext for MockRequestContext {
    type Output = MockOutcome;

    fn set_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key, value);
    }

    fn redirect(&mut self, location: &str) -> Self::Output {
        self.redirects += 1;
        MockOutcome::Redirect(location.to_string())
    }

    async fn forward(&mut self, view: &str) -> Result<Self::Output, GuardError> {
        if self.missing_views.contains(view) {
            return Err(GuardError::ViewNotFound(view.to_string()));
        }
        self.forwards += 1;
        Ok(MockOutcome::Forward {
            view: view.to_string(),
            attributes: self.attributes.clone(),
        })
    }
}
