//! Cache Entry Type
//!
//! This module provides the `Pair<K, V>` structure stored by every list node and
//! handed back to callers whenever an entry leaves a cache (evictions, removals).
//!
//! # Equality
//!
//! `Pair` compares on both key and value. This is what the by-value
//! [`List::remove`](crate::list::List::remove) scan matches on. The caches
//! themselves look entries up by key alone.
//!
//! # Usage Examples
//!
//! ```
//! use mglru_cache::Pair;
//!
//! let pair = Pair::new("key", 42);
//! assert_eq!(pair.key, "key");
//! assert_eq!(pair.value, 42);
//!
//! let (key, value) = pair.into_tuple();
//! assert_eq!((key, value), ("key", 42));
//! ```

use core::fmt;

/// A key/value entry.
///
/// Entries are replaced wholesale on update; the caches never hand out a
/// `Pair` that is still linked into one of their lists.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,
}

impl<K, V> Pair<K, V> {
    /// Creates a new entry.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Borrows the key and value together.
    #[inline]
    pub fn as_refs(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(pair: Pair<K, V>) -> Self {
        pair.into_tuple()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pair")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
