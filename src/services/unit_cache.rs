//! Shelf unit lookup cache
//!
//! At most one request per key is in flight at any time. The entry is
//! registered before the request starts, so concurrent callers on the same
//! key share it. Requests run on their own task and always complete, even
//! when every caller has gone away.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::models::shelf::ShelfUnitDetail;

/// Outcome of a shelf unit lookup
#[derive(Debug, Clone, PartialEq)]
pub enum UnitLookup {
    Found(ShelfUnitDetail),
    /// The server answered 404 (or the id was blank)
    NotFound,
    /// The server answered with a payload lacking a unit id
    Malformed,
    /// Transport failure, unexpected status or undecodable body
    Failed(String),
}

impl UnitLookup {
    /// Collapse into the caller-facing shape: anything but `Found` is `None`
    pub fn into_detail(self) -> Option<ShelfUnitDetail> {
        match self {
            UnitLookup::Found(detail) => Some(detail),
            UnitLookup::NotFound | UnitLookup::Malformed | UnitLookup::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnitLookup::Failed(_))
    }
}

/// When settled entries may be replaced by a fresh request
///
/// The default keeps every settled entry, failures included, for the
/// lifetime of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CachePolicy {
    /// Age after which any settled entry is refetched
    pub ttl: Option<Duration>,
    /// Age after which a `Failed` entry is refetched
    pub failure_retry_after: Option<Duration>,
}

impl CachePolicy {
    fn is_stale(&self, settled: &Settled, now: Instant) -> bool {
        let age = now.saturating_duration_since(settled.at);
        let expired = self.ttl.is_some_and(|ttl| age >= ttl);
        let retry = settled.outcome.is_failure()
            && self.failure_retry_after.is_some_and(|after| age >= after);
        expired || retry
    }
}

#[derive(Debug, Clone)]
struct Settled {
    outcome: UnitLookup,
    at: Instant,
}

/// `None` while the request is in flight
type Slot = watch::Receiver<Option<Settled>>;

#[derive(Clone, Default)]
pub struct UnitCache {
    entries: Arc<Mutex<HashMap<String, Slot>>>,
    policy: CachePolicy,
}

impl UnitCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: Arc::default(),
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Number of keys, in flight or settled
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every entry. Requests still in flight complete but are no
    /// longer observed by new lookups.
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    /// Return the cached outcome for `key`, starting `fetch` only when no
    /// usable entry exists
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, fetch: F) -> UnitLookup
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = UnitLookup> + Send + 'static,
    {
        let mut slot = self.slot(key, fetch);

        let settled = match slot.wait_for(Option::is_some).await {
            Ok(settled) => (*settled).clone(),
            Err(_) => None,
        };

        match settled {
            Some(settled) => settled.outcome,
            // The request task died before reporting
            None => UnitLookup::Failed(format!("Lookup of shelf unit {} was aborted", key)),
        }
    }

    fn slot<F, Fut>(&self, key: &str, fetch: F) -> Slot
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = UnitLookup> + Send + 'static,
    {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(slot) = entries.get(key) {
            let usable = match &*slot.borrow() {
                Some(settled) => !self.policy.is_stale(settled, Instant::now()),
                None => true,
            };
            if usable {
                tracing::debug!("Shelf unit cache hit for {}", key);
                return slot.clone();
            }
            tracing::debug!("Shelf unit cache entry for {} is stale", key);
        } else {
            tracing::debug!("Shelf unit cache miss for {}", key);
        }

        let (tx, rx) = watch::channel(None);
        entries.insert(key.to_string(), rx.clone());

        let request = fetch();
        tokio::spawn(async move {
            let outcome = request.await;
            tx.send_replace(Some(Settled {
                outcome,
                at: Instant::now(),
            }));
        });

        rx
    }
}
