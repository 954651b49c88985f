//! Concurrent MGLRU Cache
//!
//! A thread-safe wrapper around [`MglruCache`](crate::MglruCache).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentMglruCache                            │
//! │                                                                      │
//! │  ┌────────────────────────────────────────────────────────────────┐  │
//! │  │                       parking_lot::Mutex                       │  │
//! │  │  ┌──────────────────────────────────────────────────────────┐  │  │
//! │  │  │ MglruCache                                               │  │  │
//! │  │  │   gen 0 ──▶ gen 1 ──▶ ... ──▶ gen N-1 ──▶ evicted        │  │  │
//! │  │  │   keys: key ──▶ generation                               │  │  │
//! │  │  └──────────────────────────────────────────────────────────┘  │  │
//! │  └────────────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why One Lock?
//!
//! A single insertion can cascade through every generation, and the key map
//! is shared by all of them. Sharding by key hash would give each shard its own
//! generation chain and change which entries get evicted, so the whole cache
//! sits behind one lock.
//!
//! `get()` promotes, so every operation needs exclusive access and a `Mutex`
//! is used rather than an `RwLock`.
//!
//! # Example
//!
//! ```
//! use mglru_cache::concurrent::ConcurrentMglruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentMglruCache::try_new(4, 256).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 let key = format!("key_{t}_{i}");
//!                 cache.put(key.clone(), i);
//!                 let _ = cache.get(&key);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

use crate::config::MglruCacheConfig;
use crate::entry::Pair;
use crate::error::CacheError;
use crate::mglru::MglruCache;
use crate::snapshot::MglruSnapshot;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A thread-safe multi-generational LRU cache.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone + Send`.
/// - `V`: Value type. Must implement `Clone + Send` for [`get`](Self::get).
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
pub struct ConcurrentMglruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<MglruCache<K, V, S>>,
}

impl<K, V> ConcurrentMglruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
{
    /// Creates a concurrent cache from a configuration with an optional hasher.
    pub fn init(config: MglruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self {
            inner: Mutex::new(MglruCache::init(config, hasher)),
        }
    }

    /// Creates a concurrent cache with `generations` generations of `capacity` entries each.
    pub fn new(generations: NonZeroUsize, capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(MglruCache::new(generations, capacity)),
        }
    }

    /// Creates a concurrent cache from plain integers, rejecting zero sizes.
    pub fn try_new(generations: usize, capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            inner: Mutex::new(MglruCache::try_new(generations, capacity)?),
        })
    }
}

impl<K, V, S> ConcurrentMglruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send,
    V: Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a concurrent cache with a custom hash builder.
    pub fn init_with_hasher(config: MglruCacheConfig, hash_builder: S) -> Self {
        Self {
            inner: Mutex::new(MglruCache::with_hasher(config, hash_builder)),
        }
    }

    /// Maximum number of entries across all generations.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Number of generations.
    pub fn generation_count(&self) -> NonZeroUsize {
        self.inner.lock().generation_count()
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if no generation holds an entry.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Retrieves a **clone** of the value and promotes the key to generation 0.
    ///
    /// For values that are expensive to clone, use [`get_with()`](Self::get_with).
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Promotes the key and applies `f` to its value while holding the lock.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Promotes the key and applies `f` to a mutable reference to its value.
    ///
    /// ```
    /// use mglru_cache::concurrent::ConcurrentMglruCache;
    ///
    /// let cache = ConcurrentMglruCache::try_new(2, 8).unwrap();
    /// cache.put("counter", 0);
    /// cache.get_mut_with(&"counter", |value| *value += 1);
    /// assert_eq!(cache.get(&"counter"), Some(1));
    /// ```
    pub fn get_mut_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V) -> R,
    {
        self.inner.lock().get_mut(key).map(f)
    }

    /// Returns a clone of the value without promoting the key.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    /// Inserts a key-value pair. Returns the entry evicted from the oldest
    /// generation, if any.
    pub fn put(&self, key: K, value: V) -> Option<Pair<K, V>> {
        self.inner.lock().put(key, value)
    }

    /// Moves the key to the front of generation 0. Returns false on a miss.
    pub fn promote<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().promote(key)
    }

    /// Promotes the first entry, youngest to oldest, matching `pred`.
    pub fn promote_where<F>(&self, pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.inner.lock().promote_where(pred)
    }

    /// Removes the key from whichever generation holds it.
    pub fn remove<Q>(&self, key: &Q) -> Option<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(key)
    }

    /// Returns true if the key is resident. Does not promote.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Index of the generation holding the key.
    pub fn generation_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().generation_of(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Captures every generation under a single lock acquisition.
    pub fn snapshot(&self) -> MglruSnapshot<K, V>
    where
        V: Clone,
    {
        self.inner.lock().snapshot()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// Use this to make several operations atomic with respect to other threads.
    pub fn with_lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut MglruCache<K, V, S>) -> R,
    {
        f(&mut self.inner.lock())
    }
}

impl<K, V, S> fmt::Debug for ConcurrentMglruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f
                .debug_struct("ConcurrentMglruCache")
                .field("inner", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentMglruCache")
                .field("inner", &"<locked>")
                .finish_non_exhaustive(),
        }
    }
}
