use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use session_guard::SessionAttributes;

/// Server-side state of one session
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SessionRecord {
    pub(crate) id: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) last_accessed_at: DateTime<Utc>,
    pub(crate) attributes: SessionAttributes,
}

impl SessionRecord {
    pub(crate) fn new(id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            last_accessed_at: now,
            attributes: SessionAttributes::default(),
        }
    }

    fn is_idle_longer_than(&self, now: DateTime<Utc>, max_age: u64) -> bool {
        let max_idle = i64::try_from(max_age)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        now - self.last_accessed_at > max_idle
    }
}

pub(crate) struct InMemorySessionStore {
    entry: HashMap<String, SessionRecord>,
}

pub(crate) static SESSION_STORE: LazyLock<Mutex<InMemorySessionStore>> =
    LazyLock::new(|| Mutex::new(InMemorySessionStore::new()));

impl InMemorySessionStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory session registry");
        Self {
            entry: HashMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, record: SessionRecord) {
        self.entry.insert(record.id.clone(), record);
    }

    /// Drop every session idle longer than `max_age` seconds, returning how many were dropped
    pub(crate) fn sweep_idle(&mut self, now: DateTime<Utc>, max_age: u64) -> usize {
        let before = self.entry.len();
        self.entry
            .retain(|_, record| !record.is_idle_longer_than(now, max_age));
        let swept = before - self.entry.len();
        if swept > 0 {
            tracing::debug!("Swept {} idle sessions", swept);
        }
        swept
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.entry.contains_key(id)
    }

    /// Look up a live session without recording an access
    pub(crate) fn peek(&self, id: &str, now: DateTime<Utc>, max_age: u64) -> Option<SessionRecord> {
        self.entry
            .get(id)
            .filter(|record| !record.is_idle_longer_than(now, max_age))
            .cloned()
    }

    /// Record an access to a live session
    ///
    /// Returns the session as it was before this access, so its
    /// `last_accessed_at` is the time of the previous request. Sessions idle
    /// longer than `max_age` seconds are dropped and yield `None`.
    pub(crate) fn touch(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
        max_age: u64,
    ) -> Option<SessionRecord> {
        let record = self.entry.get_mut(id)?;
        if record.is_idle_longer_than(now, max_age) {
            tracing::debug!("Session {} expired at {}", id, record.last_accessed_at);
            self.entry.remove(id);
            return None;
        }
        let previous = record.clone();
        record.last_accessed_at = now;
        Some(previous)
    }

    /// Replace the attributes of a session, returning false if it no longer exists
    pub(crate) fn save_attributes(&mut self, id: &str, attributes: SessionAttributes) -> bool {
        match self.entry.get_mut(id) {
            Some(record) => {
                record.attributes = attributes;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<SessionRecord> {
        self.entry.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_guard::LoginState;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_touch_returns_previous_access_and_records_new_one() {
        let mut store = InMemorySessionStore::new();
        let created = now() - Duration::minutes(10);
        store.insert(SessionRecord::new("s1".to_string(), created));

        let current = now();
        let previous = store.touch("s1", current, 3600).unwrap();
        assert_eq!(previous.last_accessed_at, created);

        let stored = store.peek("s1", current, 3600).unwrap();
        assert_eq!(stored.last_accessed_at, current);
        assert_eq!(stored.created_at, created);
    }

    #[test]
    fn test_touch_unknown_session() {
        let mut store = InMemorySessionStore::new();
        assert!(store.touch("missing", now(), 3600).is_none());
    }

    #[test]
    fn test_idle_session_is_dropped() {
        let mut store = InMemorySessionStore::new();
        store.insert(SessionRecord::new(
            "idle".to_string(),
            now() - Duration::hours(2),
        ));

        assert!(store.peek("idle", now(), 3600).is_none());
        assert!(store.touch("idle", now(), 3600).is_none());
        assert!(store.remove("idle").is_none());
    }

    #[test]
    fn test_sweep_reclaims_idle_sessions_without_lookup() {
        let mut store = InMemorySessionStore::new();
        for i in 0..5 {
            store.insert(SessionRecord::new(
                format!("stale{i}"),
                now() - Duration::hours(2),
            ));
        }
        store.insert(SessionRecord::new("fresh".to_string(), now()));

        assert_eq!(store.sweep_idle(now(), 3600), 5);
        assert!(store.contains("fresh"));
        assert!((0..5).all(|i| !store.contains(&format!("stale{i}"))));
        assert_eq!(store.sweep_idle(now(), 3600), 0);
    }

    #[test]
    fn test_huge_max_age_does_not_panic() {
        let mut store = InMemorySessionStore::new();
        store.insert(SessionRecord::new(
            "old".to_string(),
            now() - Duration::days(365),
        ));

        assert!(store.peek("old", now(), u64::MAX).is_some());
        assert!(store.peek("old", now(), i64::MAX as u64).is_some());
        assert_eq!(store.sweep_idle(now(), u64::MAX), 0);
    }

    #[test]
    fn test_save_attributes() {
        let mut store = InMemorySessionStore::new();
        store.insert(SessionRecord::new("s2".to_string(), now()));

        let attributes = SessionAttributes {
            login_state: Some(LoginState::LoggedIn),
            ..Default::default()
        };
        assert!(store.save_attributes("s2", attributes.clone()));
        assert_eq!(store.peek("s2", now(), 3600).unwrap().attributes, attributes);

        store.remove("s2");
        assert!(!store.save_attributes("s2", attributes));
    }
}
