//! Agent session cache.
//!
//! Resolves a credential set to an agent handle, constructing one on first use
//! and reusing it afterwards. Concurrent misses for the same fingerprint may
//! both construct; the store keeps whichever lands last, and the handles are
//! interchangeable because they were built from identical credentials.

use std::sync::Arc;
use std::time::Instant;

use walletpilot_types::credential::CredentialSet;
use walletpilot_types::error::AgentError;

use crate::agent::AgentHandle;
use crate::agent::backend::BoxAgentBackend;

use super::fingerprint::{Fingerprinter, SessionFingerprint};
use super::store::SessionStore;

/// Get-or-create cache of agent handles keyed by credential fingerprint.
pub struct AgentSessionCache {
    store: Arc<dyn SessionStore>,
    backend: BoxAgentBackend,
    fingerprinter: Arc<dyn Fingerprinter>,
}

impl AgentSessionCache {
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: BoxAgentBackend,
        fingerprinter: Arc<dyn Fingerprinter>,
    ) -> Self {
        Self {
            store,
            backend,
            fingerprinter,
        }
    }

    pub fn fingerprint(&self, credentials: &CredentialSet) -> SessionFingerprint {
        self.fingerprinter.fingerprint(credentials)
    }

    /// Number of retained handles.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Return the cached handle for `credentials`, constructing it on a miss.
    ///
    /// A failed construction is not stored, so the next call retries it.
    pub async fn get_or_create(
        &self,
        credentials: &CredentialSet,
    ) -> Result<AgentHandle, AgentError> {
        let fingerprint = self.fingerprint(credentials);

        if let Some(handle) = self.store.get(&fingerprint) {
            tracing::debug!(fingerprint = %fingerprint, "agent session cache hit");
            return Ok(handle);
        }

        let start = Instant::now();
        let runtime = match self.backend.construct(credentials).await {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!(
                    fingerprint = %fingerprint,
                    kind = e.kind(),
                    error = %e,
                    "agent construction failed"
                );
                return Err(e);
            }
        };

        let handle = AgentHandle::new(fingerprint.clone(), runtime);
        self.store.insert(fingerprint.clone(), handle.clone());

        tracing::info!(
            fingerprint = %fingerprint,
            wallet = %handle.binding().address,
            network = %handle.binding().network,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "agent session created"
        );

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::InMemorySessionStore;
    use crate::testing::{SpyBackend, StubFingerprinter, credentials};

    fn cache_with(spy: &SpyBackend) -> (AgentSessionCache, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let cache = AgentSessionCache::new(
            store.clone(),
            BoxAgentBackend::new(spy.clone()),
            Arc::new(StubFingerprinter),
        );
        (cache, store)
    }

    #[tokio::test]
    async fn second_lookup_reuses_the_first_handle() {
        let spy = SpyBackend::replying(&["ok"]);
        let (cache, store) = cache_with(&spy);
        let creds = credentials("sk-one");

        let first = cache.get_or_create(&creds).await.unwrap();
        let second = cache.get_or_create(&creds).await.unwrap();

        assert_eq!(spy.constructions(), 1);
        assert!(first.same_runtime(&second));
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn different_credentials_get_different_handles() {
        let spy = SpyBackend::replying(&["ok"]);
        let (cache, store) = cache_with(&spy);

        let a = cache.get_or_create(&credentials("sk-one")).await.unwrap();
        let b = cache.get_or_create(&credentials("sk-two")).await.unwrap();

        assert_ne!(a.fingerprint(), b.fingerprint());
        assert!(!a.same_runtime(&b));
        assert_eq!(spy.constructions(), 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn failed_construction_is_not_cached() {
        let spy = SpyBackend::failing("wallet platform unreachable");
        let (cache, store) = cache_with(&spy);
        let creds = credentials("sk-one");

        let err = cache.get_or_create(&creds).await.unwrap_err();
        assert_eq!(err.kind(), "construction_error");
        assert!(store.is_empty());

        let _ = cache.get_or_create(&creds).await;
        assert_eq!(spy.constructions(), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_retain_one_handle() {
        let spy = SpyBackend::replying(&["ok"]).with_delay_ms(20);
        let (cache, store) = cache_with(&spy);
        let cache = Arc::new(cache);

        let tasks: Vec<_> = (0..2)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_or_create(&credentials("sk-one")).await })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }

        assert_eq!(store.len(), 1);
        assert!(spy.constructions() >= 1 && spy.constructions() <= 2);
    }
}
