//! TTL response cache and request fingerprints.
//!
//! One cache instance holds one value type; the pipeline runs two
//! namespaced instances (place lists and geocode results). Expiry is
//! driven by an injected [`Clock`] so TTL behavior is testable without
//! sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Injectable time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Production clock backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Key/value store with time-based expiry.
///
/// No eviction beyond TTL; the key space is bounded by realistic usage
/// (fingerprints of user searches). Reads take a short mutex; the lock is
/// never held across an await. Failed upstream calls are never stored, so
/// errors are not negative-cached.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the cached value, or `None` on miss or expiry. Expired
    /// entries are removed on access.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if self.clock.now() <= entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a value under `key`, overwriting any previous entry and
    /// resetting its expiry to now + TTL.
    pub fn set(&self, key: &str, value: V) {
        let expires_at = self.clock.now() + self.ttl;
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), Entry { value, expires_at });
    }
}

/// Fingerprint for a place search: normalized location, radius, and the
/// sorted category list. Sorting makes the key independent of the order
/// categories were requested in.
#[must_use]
pub fn places_key<S: AsRef<str>>(location: &str, radius_km: f64, categories: &[S]) -> String {
    let mut sorted: Vec<&str> = categories.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    format!(
        "places:{}:{radius_km}:{}",
        location.trim().to_lowercase(),
        sorted.join(",")
    )
}

/// Fingerprint for a geocode lookup, keyed by the raw address string.
/// Separate namespace from place searches.
#[must_use]
pub fn geocode_key(address: &str) -> String {
    format!("geocode:{address}")
}
