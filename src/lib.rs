#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Building Blocks
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                                                                              │
//! │   ConcurrentMglruCache  (feature "concurrent", one parking_lot::Mutex)       │
//! │            │                                                                 │
//! │            ▼                                                                 │
//! │      MglruCache ──── keys: key ──▶ generation index                          │
//! │            │                                                                 │
//! │            ▼  one per generation                                             │
//! │       LruCache ───── map: key ──▶ NodeHandle                                 │
//! │            │                                                                 │
//! │            ▼                                                                 │
//! │        List<Pair<K, V>>  (arena-backed doubly linked list)                   │
//! │                                                                              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`List`] | Doubly linked list addressed by generation-checked [`NodeHandle`]s |
//! | [`LruCache`] | Fixed-capacity least recently used cache |
//! | [`MglruCache`] | Chain of LRU generations with cascading eviction |
//! | [`MglruSnapshot`] | Copy of every generation's contents, for inspection |
//!
//! ## Code Examples
//!
//! ### LRU
//!
//! ```rust
//! use mglru_cache::LruCache;
//! use mglru_cache::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ### MGLRU
//!
//! ```rust
//! use mglru_cache::{MglruCache, Pair};
//!
//! let mut cache = MglruCache::try_new(2, 2).unwrap();
//! cache.put(1, 10);
//! cache.put(2, 20);
//! cache.get(&1);
//! cache.put(3, 30);
//! cache.put(4, 40);
//!
//! // Generation 1 is full as well now; the oldest entry leaves the cache.
//! assert_eq!(cache.put(5, 50), Some(Pair::new(2, 20)));
//! assert_eq!(cache.get(&3), Some(&30));
//! assert_eq!(cache.front(), Some((&3, &30)));
//! ```
//!
//! ### Integer Sentinel
//!
//! Integer-valued caches can report misses with [`NOT_FOUND`] instead of `None`:
//!
//! ```rust
//! use mglru_cache::{MglruCache, NOT_FOUND};
//!
//! let mut cache: MglruCache<u32, i64> = MglruCache::try_new(1, 1).unwrap();
//! cache.put(1, 10);
//! assert_eq!(cache.get_or_sentinel(&1), 10);
//! assert_eq!(cache.get_or_sentinel(&2), NOT_FOUND);
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Key/value entry type stored by every cache.
pub mod entry;

/// Error type shared by the list and the caches.
pub mod error;

/// Arena-backed doubly linked list.
///
/// Nodes live in a slot vector and are addressed by [`NodeHandle`]s that carry
/// the slot's version, so a handle to a removed node is reported as an error
/// instead of touching whatever reuses the slot.
pub mod list;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// A fixed-capacity cache that evicts the least recently used entry when full.
/// It is also the building block for each MGLRU generation.
pub mod lru;

/// Multi-Generational LRU (MGLRU) cache implementation.
///
/// Chains several LRU generations; entries evicted from one generation
/// cascade into the next, and only the oldest generation evicts for real.
pub mod mglru;

/// Inspection snapshots of generation contents.
pub mod snapshot;

/// Thread-safe MGLRU cache.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use entry::Pair;
pub use error::CacheError;
pub use list::{List, NodeHandle};
pub use lru::LruCache;
pub use mglru::MglruCache;
pub use snapshot::{GenerationSnapshot, MglruSnapshot};

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentMglruCache;

/// Value returned by the integer lookups (`get_or_sentinel`) on a miss.
pub const NOT_FOUND: i64 = -1;
