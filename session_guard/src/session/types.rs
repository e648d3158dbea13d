use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login state kept on a session under the `"state"` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginState {
    #[default]
    NotLoggedIn,
    LoggedIn,
    /// Set on a session that failed the activity window check
    LoggedOutTooLong,
}

/// Attribute bag of a session
///
/// The login state is kept as a typed field; every other attribute is stored
/// as JSON under its own key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionAttributes {
    #[serde(rename = "state", default, skip_serializing_if = "Option::is_none")]
    pub login_state: Option<LoginState>,
    #[serde(flatten)]
    pub values: HashMap<String, Value>,
}

impl SessionAttributes {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}

/// Request-scoped attributes handed to a view when forwarding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestAttributes(HashMap<String, Value>);

impl RequestAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// The model attached by the guard, if any
    pub fn bean(&self) -> Option<&Value> {
        self.get(crate::config::BEAN_ATTRIBUTE)
    }
}
