//! Memoization for parsed templates and compiled placeholders
//!
//! Every cached computation is a pure function of its key (the template or
//! placeholder text), so the cache only ever affects latency:
//!
//! - **Unbounded**: keep every entry for the life of the cache
//! - **Bounded**: keep at most `capacity` entries, evicting the oldest insertion
//! - **Disabled**: recompute every time, store nothing
//!
//! Concurrent callers use insert-if-absent: two threads racing on the same key
//! may both compute the value, but the first insertion wins and both observe it.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// How a [`MemoCache`] retains entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    #[default]
    Unbounded,
    Bounded {
        capacity: usize,
    },
    Disabled,
}

/// Hit/miss counters of a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Text-keyed memoization cache
#[derive(Debug)]
pub struct MemoCache<V> {
    policy: CachePolicy,
    entries: RwLock<IndexMap<String, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> MemoCache<V> {
    /// Create an empty cache with the given retention policy
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: RwLock::new(IndexMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    ///
    /// Failed computations are not cached.
    pub fn get_or_try_insert_with<E, F>(&self, key: &str, make: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if self.policy == CachePolicy::Disabled {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return make();
        }

        if let Some(value) = self.entries.read().get(key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = make()?;

        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(key) {
            return Ok(existing.clone());
        }
        entries.insert(key.to_string(), value.clone());
        if let CachePolicy::Bounded { capacity } = self.policy {
            while entries.len() > capacity {
                entries.shift_remove_index(0);
            }
        }
        Ok(value)
    }

    /// Infallible variant of [`MemoCache::get_or_try_insert_with`]
    pub fn get_or_insert_with<F>(&self, key: &str, make: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.get_or_try_insert_with::<std::convert::Infallible, _>(key, || Ok(make())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl<V: Clone> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}
