//! Transposition cache.
//!
//! Entries are keyed by position, remaining depth and side to move, never by
//! the alpha/beta window. Each entry records whether its value is exact or
//! only a bound, so a value computed under one window can be reused under
//! another whenever the bound is strong enough.

use std::collections::{HashMap, VecDeque};

use engine_core::GameState;
use tracing::trace;

/// Cache key. Two nodes share an entry only if they are the same position,
/// searched to the same remaining depth, with the same side maximizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranspositionKey {
    pub position: u64,
    pub depth: u32,
    pub maximizing: bool,
}

impl TranspositionKey {
    pub fn new<S: GameState>(state: &S, depth: u32, maximizing: bool) -> Self {
        Self {
            position: state.position_key(),
            depth,
            maximizing,
        }
    }
}

/// What a cached value says about the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The value is exact.
    Exact,
    /// The true value is at least the cached value (search failed high).
    Lower,
    /// The true value is at most the cached value (search failed low).
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    pub value: f64,
    pub bound: Bound,
}

impl CacheEntry {
    /// Classify a fail-soft result against the window it was searched with.
    pub fn classify(value: f64, alpha: f64, beta: f64) -> Self {
        let bound = if value <= alpha {
            Bound::Upper
        } else if value >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        Self { value, bound }
    }

    /// The value to return for a node searched with `(alpha, beta)`, if this
    /// entry alone settles it.
    pub fn resolve(&self, alpha: f64, beta: f64) -> Option<f64> {
        match self.bound {
            Bound::Exact => Some(self.value),
            Bound::Lower if self.value >= beta => Some(self.value),
            Bound::Upper if self.value <= alpha => Some(self.value),
            _ => None,
        }
    }
}

/// Counters kept across the lifetime of a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub evictions: u64,
}

/// Memo of subtree values with optional capacity.
///
/// When full, the oldest inserted entry is evicted first. Overwriting an
/// existing key keeps its original insertion slot.
#[derive(Debug, Clone, Default)]
pub struct TranspositionCache {
    entries: HashMap<TranspositionKey, CacheEntry>,
    insertion_order: VecDeque<TranspositionKey>,
    capacity: Option<usize>,
    stats: CacheStats,
}

impl TranspositionCache {
    /// Unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` entries, or unbounded for `None`.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn get(&self, key: &TranspositionKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Look up `key` for a node searched with `(alpha, beta)`.
    ///
    /// Returns the cached value only when it settles the node; a bound that
    /// does not is counted as a miss.
    pub fn lookup(&mut self, key: &TranspositionKey, alpha: f64, beta: f64) -> Option<f64> {
        let resolved = self
            .entries
            .get(key)
            .and_then(|entry| entry.resolve(alpha, beta));
        if resolved.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        resolved
    }

    /// Store a value searched with the original window `(alpha, beta)`.
    pub fn store(&mut self, key: TranspositionKey, value: f64, alpha: f64, beta: f64) {
        self.insert(key, CacheEntry::classify(value, alpha, beta));
    }

    pub fn insert(&mut self, key: TranspositionKey, entry: CacheEntry) {
        self.stats.stores += 1;
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = entry;
            return;
        }

        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                let Some(oldest) = self.insertion_order.pop_front() else {
                    break;
                };
                if self.entries.remove(&oldest).is_some() {
                    self.stats.evictions += 1;
                    trace!(position = oldest.position, depth = oldest.depth, "evicted cache entry");
                }
            }
        }

        self.entries.insert(key, entry);
        self.insertion_order.push_back(key);
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}
