//! Point-in-time views of a multi-generational cache.
//!
//! A snapshot copies every generation's entries, most recently used first,
//! without touching recency or promoting anything. It is meant for debugging
//! and for asserting on generation layout in tests.
//!
//! ```
//! use mglru_cache::MglruCache;
//!
//! let mut cache = MglruCache::try_new(2, 2).unwrap();
//! for key in 1..=3 {
//!     cache.put(key, key * 10);
//! }
//!
//! let snapshot = cache.snapshot();
//! assert_eq!(
//!     snapshot.to_string(),
//!     "gen 0 [2/2]: 3=30 -> 2=20\ngen 1 [1/2]: 1=10\n"
//! );
//! ```

use crate::entry::Pair;
use alloc::vec::Vec;
use core::fmt;

/// Contents of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSnapshot<K, V> {
    /// Position of the generation, 0 being the youngest.
    pub index: usize,
    /// Maximum number of entries the generation holds.
    pub capacity: usize,
    /// Resident entries, most recently used first.
    pub entries: Vec<Pair<K, V>>,
}

impl<K, V> GenerationSnapshot<K, V> {
    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the generation held no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the generation was at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Keys in recency order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|pair| &pair.key)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for GenerationSnapshot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen {} [{}/{}]:", self.index, self.len(), self.capacity)?;
        for (position, pair) in self.entries.iter().enumerate() {
            if position == 0 {
                write!(f, " {pair}")?;
            } else {
                write!(f, " -> {pair}")?;
            }
        }
        Ok(())
    }
}

/// Contents of every generation of an [`MglruCache`](crate::MglruCache),
/// youngest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MglruSnapshot<K, V> {
    /// One entry per generation, ordered by index.
    pub generations: Vec<GenerationSnapshot<K, V>>,
}

impl<K, V> MglruSnapshot<K, V> {
    /// Total number of resident entries.
    pub fn len(&self) -> usize {
        self.generations.iter().map(GenerationSnapshot::len).sum()
    }

    /// Returns true if every generation was empty.
    pub fn is_empty(&self) -> bool {
        self.generations.iter().all(GenerationSnapshot::is_empty)
    }

    /// Index of the generation holding `key`, if any.
    pub fn generation_of(&self, key: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        self.generations
            .iter()
            .find(|generation| generation.keys().any(|resident| resident == key))
            .map(|generation| generation.index)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for MglruSnapshot<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for generation in &self.generations {
            writeln!(f, "{generation}")?;
        }
        Ok(())
    }
}
