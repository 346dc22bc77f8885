//! Session store: fingerprint -> agent handle.
//!
//! The store is passed into the cache rather than living in a global, so
//! tests get an isolated instance and eviction can be added behind the trait
//! later without touching call sites.

use dashmap::DashMap;

use crate::agent::AgentHandle;

use super::fingerprint::SessionFingerprint;

/// Storage backing the agent session cache.
pub trait SessionStore: Send + Sync {
    /// Cloned handle for `fingerprint`, if one is stored.
    fn get(&self, fingerprint: &SessionFingerprint) -> Option<AgentHandle>;

    /// Store `handle`, replacing any existing entry (last write wins).
    fn insert(&self, fingerprint: SessionFingerprint, handle: AgentHandle);

    /// Number of retained handles.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store backed by `DashMap`.
///
/// Additive only: entries live until the process exits. Handles are cloned
/// out on read so no `DashMap` guard is held across an `.await`.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: DashMap<SessionFingerprint, AgentHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, fingerprint: &SessionFingerprint) -> Option<AgentHandle> {
        self.inner.get(fingerprint).map(|r| r.value().clone())
    }

    fn insert(&self, fingerprint: SessionFingerprint, handle: AgentHandle) {
        self.inner.insert(fingerprint, handle);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scripted_handle;

    #[test]
    fn insert_then_get_returns_same_runtime() {
        let store = InMemorySessionStore::new();
        let fp = SessionFingerprint::new("aa");
        let handle = scripted_handle("aa", &["x"]);
        store.insert(fp.clone(), handle.clone());

        let got = store.get(&fp).unwrap();
        assert!(got.same_runtime(&handle));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn second_insert_replaces_first() {
        let store = InMemorySessionStore::new();
        let fp = SessionFingerprint::new("aa");
        let first = scripted_handle("aa", &["1"]);
        let second = scripted_handle("aa", &["2"]);
        store.insert(fp.clone(), first.clone());
        store.insert(fp.clone(), second.clone());

        assert_eq!(store.len(), 1);
        let got = store.get(&fp).unwrap();
        assert!(got.same_runtime(&second));
        assert!(!got.same_runtime(&first));
    }

    #[test]
    fn missing_fingerprint_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());
        assert!(store.get(&SessionFingerprint::new("zz")).is_none());
    }
}
