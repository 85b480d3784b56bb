// ABOUTME: Ordered API credentials per service with a forward-only current index
// ABOUTME: Compare-and-swap rotation so concurrent quota failures advance the ring once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use tracing::info;

/// Primary plus backup keys for one service
///
/// The index only moves forward. Once a key is skipped for quota it is not
/// used again until the ring is replaced.
pub struct ApiKeyRing {
    service: &'static str,
    keys: RwLock<Vec<String>>,
    index: AtomicUsize,
}

impl fmt::Debug for ApiKeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyRing")
            .field("service", &self.service)
            .field("keys", &format_args!("[{} redacted]", self.len()))
            .field("index", &self.index())
            .finish()
    }
}

impl ApiKeyRing {
    /// Ring over `keys`, blank entries dropped
    #[must_use]
    pub fn new(service: &'static str, keys: Vec<String>) -> Self {
        Self {
            service,
            keys: RwLock::new(clean(keys)),
            index: AtomicUsize::new(0),
        }
    }

    /// Service this ring belongs to
    #[must_use]
    pub const fn service(&self) -> &'static str {
        self.service
    }

    /// Number of usable keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// No usable keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Key at the current index together with that index
    #[must_use]
    pub fn current(&self) -> Option<(usize, String)> {
        let keys = self.keys.read().unwrap_or_else(PoisonError::into_inner);
        let index = self.index.load(Ordering::SeqCst);
        keys.get(index).map(|key| (index, key.clone()))
    }

    /// Move past the key at `observed` after it reported quota exhaustion
    ///
    /// Returns the key to retry with, or `None` when the ring is exhausted.
    /// When another task already moved past `observed`, its choice is reused
    /// instead of advancing a second time.
    pub fn advance_from(&self, observed: usize) -> Option<(usize, String)> {
        let keys = self.keys.read().unwrap_or_else(PoisonError::into_inner);
        let next = observed + 1;
        if next >= keys.len() {
            return None;
        }
        match self
            .index
            .compare_exchange(observed, next, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => {
                info!(service = self.service, index = next, "Switched to backup API key");
                keys.get(next).map(|key| (next, key.clone()))
            }
            Err(actual) if actual > observed => keys.get(actual).map(|key| (actual, key.clone())),
            Err(_) => None,
        }
    }

    /// Install a fresh key list and start again from the first key
    pub fn replace(&self, keys: Vec<String>) {
        let mut guard = self.keys.write().unwrap_or_else(PoisonError::into_inner);
        *guard = clean(keys);
        self.index.store(0, Ordering::SeqCst);
    }
}

fn clean(keys: Vec<String>) -> Vec<String> {
    keys.into_iter()
        .map(|k| k.trim().to_owned())
        .filter(|k| !k.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(keys: &[&str]) -> ApiKeyRing {
        ApiKeyRing::new("spoonacular", keys.iter().map(|k| (*k).to_owned()).collect())
    }

    #[test]
    fn test_advances_forward_only() {
        let ring = ring(&["a", "b"]);
        assert_eq!(ring.current(), Some((0, "a".to_owned())));
        assert_eq!(ring.advance_from(0), Some((1, "b".to_owned())));
        assert_eq!(ring.advance_from(1), None);
        assert_eq!(ring.current(), Some((1, "b".to_owned())));
    }

    #[test]
    fn test_concurrent_advance_counts_once() {
        let ring = ring(&["a", "b", "c"]);
        let first = ring.advance_from(0);
        let second = ring.advance_from(0);
        assert_eq!(first, second);
        assert_eq!(ring.index(), 1);
    }

    #[test]
    fn test_blank_keys_dropped() {
        let ring = ring(&["", "  ", "k"]);
        assert_eq!(ring.len(), 1);
        ring.replace(Vec::new());
        assert!(ring.is_empty());
        assert_eq!(ring.current(), None);
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", ring(&["secret-value"]));
        assert!(!rendered.contains("secret-value"));
    }
}
