//! In-memory TTL cache shared by the network fetchers.
//!
//! Each fetcher owns one [`TtlCache`] configured with its own lifetime.
//! Lookups go through [`TtlCache::get_or_try_fetch`], which either returns
//! the live entry for a key or runs the producer and stores its `Ok`
//! result.
//!
//! Concurrent misses for the same key share one producer call. Callers
//! that arrive while a fetch is in flight wait for its outcome, failure
//! included, instead of queueing their own upstream request. A failure is
//! handed to those waiters only and never stored, so the next lookup after
//! it completes runs the producer again.
//!
//! The key space is whatever the owning fetcher derives from its inputs
//! (one key for prices, one per requested count for sentiment). Failed
//! fetches leave no slot behind, and [`TtlCache::invalidate`] and
//! [`TtlCache::clear`] remove slots rather than emptying them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::clock::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    fetched_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_valid(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < self.ttl
    }
}

/// Outcome of the in-flight fetch, `None` until it completes.
type Outcome<T, E> = Option<Result<T, E>>;

#[derive(Debug)]
enum Slot<T, E> {
    Ready(CacheEntry<T>),
    Fetching(watch::Receiver<Outcome<T, E>>),
}

enum Lookup<T, E> {
    Hit(T),
    Wait(watch::Receiver<Outcome<T, E>>),
    Lead(watch::Sender<Outcome<T, E>>),
}

/// Keyed memoization with a single time-to-live per cache.
#[derive(Debug)]
pub struct TtlCache<T, E> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slots: Mutex<HashMap<String, Slot<T, E>>>,
}

impl<T, E> TtlCache<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the live value for `key`, or run `producer` and cache its result.
    ///
    /// When another caller is already fetching `key`, wait for that fetch
    /// and return its result. An `Err` is passed to everyone waiting on the
    /// fetch that produced it and is not stored.
    pub async fn get_or_try_fetch<F, Fut>(&self, key: &str, producer: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        loop {
            match self.lookup(key) {
                Lookup::Hit(value) => {
                    tracing::debug!(key, "cache hit");
                    return Ok(value);
                }
                Lookup::Wait(mut receiver) => {
                    tracing::debug!(key, "joining in-flight fetch");
                    let outcome = match receiver.wait_for(Option::is_some).await {
                        Ok(outcome) => outcome.clone(),
                        Err(_) => None,
                    };
                    if let Some(result) = outcome {
                        return result;
                    }
                    // The fetching caller was dropped before finishing.
                }
                Lookup::Lead(sender) => {
                    tracing::debug!(key, "cache miss");
                    let result = producer().await;
                    self.complete(key, &result);
                    sender.send_replace(Some(result.clone()));
                    return result;
                }
            }
        }
    }

    /// Return the cached value for `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();
        match self.lock_slots().get(key) {
            Some(Slot::Ready(entry)) if entry.is_valid(now) => Some(entry.value.clone()),
            _ => None,
        }
    }

    /// Drop the entry for `key`; the next lookup runs the producer.
    pub async fn invalidate(&self, key: &str) {
        self.lock_slots().remove(key);
    }

    pub async fn clear(&self) {
        self.lock_slots().clear();
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.lock_slots()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn lookup(&self, key: &str) -> Lookup<T, E> {
        let now = self.clock.now();
        let mut slots = self.lock_slots();
        match slots.get(key) {
            Some(Slot::Ready(entry)) if entry.is_valid(now) => {
                return Lookup::Hit(entry.value.clone());
            }
            // A closed channel means the fetching caller went away.
            Some(Slot::Fetching(receiver)) if receiver.has_changed().is_ok() => {
                return Lookup::Wait(receiver.clone());
            }
            _ => {}
        }

        let (sender, receiver) = watch::channel(None);
        slots.insert(key.to_owned(), Slot::Fetching(receiver));
        Lookup::Lead(sender)
    }

    fn complete(&self, key: &str, result: &Result<T, E>) {
        let mut slots = self.lock_slots();
        match result {
            Ok(value) => {
                slots.insert(
                    key.to_owned(),
                    Slot::Ready(CacheEntry {
                        value: value.clone(),
                        fetched_at: self.clock.now(),
                        ttl: self.ttl,
                    }),
                );
            }
            Err(_) => {
                slots.remove(key);
            }
        }
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot<T, E>>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
