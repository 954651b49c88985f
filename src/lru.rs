//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides the single-generation LRU cache that the
//! multi-generational cache chains together. It is a fully usable cache on its
//! own.
//!
//! # Algorithm
//!
//! The LRU cache keeps entries in order of recency of use, evicting the least
//! recently used entry when a new key arrives and the cache is full. The front
//! of the internal list is the most recently used entry; the back is the least
//! recently used one.
//!
//! ```text
//!   map: key ──▶ NodeHandle
//!                   │
//!                   ▼
//!   MRU ◀──▶ [k3] ◀──▶ [k1] ◀──▶ [k2] ◀──▶ LRU  ──▶ evicted on put when full
//! ```
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - One arena slot per entry plus one hash map bucket holding a clone of the key
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache with a synchronization primitive such as `Mutex`.

use crate::config::LruCacheConfig;
use crate::entry::Pair;
use crate::error::CacheError;
use crate::list::{self, List, NodeHandle};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use log::warn;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and removing entries. When the cache reaches capacity,
/// the least recently used entry is evicted to make room for a new key and is
/// handed back to the caller.
///
/// # Examples
///
/// ```
/// use mglru_cache::{LruCache, Pair};
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// assert_eq!(cache.put(1, 10), None);
/// assert_eq!(cache.put(2, 20), None);
///
/// // Accessing an entry makes it the most recently used
/// assert_eq!(cache.get(&1), Some(&10));
///
/// // Adding beyond capacity evicts the least recently used entry
/// assert_eq!(cache.put(3, 30), Some(Pair::new(2, 20)));
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&3), Some(&30));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<Pair<K, V>>,
    map: HashMap<K, NodeHandle, S>,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = cap.get().next_power_of_two();
        LruCache {
            config: LruCacheConfig { capacity: cap },
            list: List::with_capacity(cap.get()),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if the next put of a new key will evict an entry.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.map.len() >= self.config.capacity.get()
    }

    /// Moves the node to the front. Returns false if the map held a handle the
    /// list no longer knows; the stale map entry is dropped in that case.
    fn touch<Q>(&mut self, key: &Q, handle: NodeHandle) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.list.move_to_front(handle) {
            Ok(()) => true,
            Err(err) => {
                warn!("lru map out of sync with its list: {err}");
                self.map.remove(key);
                false
            }
        }
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = *self.map.get(key)?;
        if !self.touch(key, handle) {
            return None;
        }
        self.list.get(handle).map(|pair| &pair.value)
    }

    /// Returns a mutable reference to the value for `key` and marks it most
    /// recently used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = *self.map.get(key)?;
        if !self.touch(key, handle) {
            return None;
        }
        self.list.get_mut(handle).map(|pair| &mut pair.value)
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = *self.map.get(key)?;
        self.list.get(handle).map(|pair| &pair.value)
    }

    /// Returns true if `key` is resident. Does not change recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// The most recently used entry.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.list.front().map(Pair::as_refs)
    }

    /// Mutable access to the most recently used entry's value. Recency is
    /// unchanged since the entry is already at the front.
    pub fn front_mut(&mut self) -> Option<(&K, &mut V)> {
        self.list
            .front_mut()
            .map(|pair| (&pair.key, &mut pair.value))
    }

    /// The least recently used entry, i.e. the next eviction candidate.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.list.back().map(Pair::as_refs)
    }

    /// Removes `key` and returns its entry.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.map.remove(key)?;
        match self.list.remove_node(handle) {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!("lru map out of sync with its list: {err}");
                None
            }
        }
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<Pair<K, V>> {
        let pair = self.list.pop_back()?;
        self.map.remove(&pair.key);
        Some(pair)
    }

    /// Iterates over the entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self)
    where
        K: core::fmt::Debug,
    {
        self.list.assert_consistent();
        assert_eq!(self.list.len(), self.map.len());
        assert!(self.list.len() <= self.cap().get());
        for pair in self.list.iter() {
            let handle = self.map[&pair.key];
            assert_eq!(self.list.get(handle).map(|p| &p.key), Some(&pair.key));
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts a key-value pair.
    ///
    /// If `key` is already resident its value is replaced, it becomes the most
    /// recently used entry and `None` is returned. Otherwise, if the cache is
    /// full, the least recently used entry is evicted and returned.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<Pair<K, V>> {
        self.put_pair(Pair::new(key, value))
    }

    /// Inserts an entry. See [`put`](Self::put).
    pub fn put_pair(&mut self, pair: Pair<K, V>) -> Option<Pair<K, V>> {
        if let Some(&handle) = self.map.get(&pair.key) {
            if self.touch(&pair.key, handle) {
                if let Some(stored) = self.list.get_mut(handle) {
                    stored.value = pair.value;
                    return None;
                }
                self.map.remove(&pair.key);
            }
        }

        let evicted = if self.is_full() { self.pop_lru() } else { None };

        let key = pair.key.clone();
        let handle = self.list.push_front(pair);
        self.map.insert(key, handle);

        evicted
    }
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache that holds at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a capacity given as a plain integer.
    pub fn try_new(cap: usize) -> Result<LruCache<K, V, DefaultHashBuilder>, CacheError> {
        let config = LruCacheConfig::try_new(cap)?;
        Ok(LruCache::init(config, None))
    }

    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// use mglru_cache::config::LruCacheConfig;
    /// use mglru_cache::LruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = LruCacheConfig {
    ///     capacity: NonZeroUsize::new(100).unwrap(),
    /// };
    /// let mut cache: LruCache<&str, u32> = LruCache::init(config, None);
    /// cache.put("a", 1);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, S: BuildHasher> LruCache<K, i64, S> {
    /// Integer-valued lookup returning [`NOT_FOUND`](crate::NOT_FOUND) on a miss.
    pub fn get_or_sentinel<Q>(&mut self, key: &Q) -> i64
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).copied().unwrap_or(crate::NOT_FOUND)
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

/// Iterator over an [`LruCache`], most recently used first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, Pair<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Pair::as_refs)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn keys<K: Clone + Hash + Eq, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.put("apple", 3), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.put("cherry", 4), Some(Pair::new("banana", 2)));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_capacity_two_scenario() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        assert_eq!(cache.put(1, 10), None);
        assert_eq!(cache.put(2, 20), None);
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.front(), Some((&1, &10)));
        assert_eq!(cache.put(3, 30), Some(Pair::new(2, 20)));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&3), Some(&30));
        assert_eq!(keys(&cache), [3, 1]);
    }

    #[test]
    fn test_lru_update_promotes_without_eviction() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.back(), Some((&1, &10)));
        assert_eq!(cache.put(1, 11), None);
        assert_eq!(cache.front(), Some((&1, &11)));
        assert_eq!(cache.back(), Some((&2, &20)));
        assert_eq!(cache.len(), 2);
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.peek(&1), Some(&10));
        assert!(cache.contains(&1));
        assert_eq!(cache.put(3, 30), Some(Pair::new(1, 10)));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(Pair::new("apple", 1)));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);
        assert_eq!(cache.put("cherry", 3), None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_pop_lru() {
        let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        cache.get(&1);
        assert_eq!(cache.pop_lru(), Some(Pair::new(2, 2)));
        assert_eq!(cache.pop_lru(), Some(Pair::new(3, 3)));
        assert_eq!(cache.pop_lru(), Some(Pair::new(1, 1)));
        assert_eq!(cache.pop_lru(), None);
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_capacity_limits() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert!(cache.is_full());
        cache.put("cherry", 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        assert_eq!(cache.get(&key2), Some(&2));
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
        assert_eq!(cache.remove("apple").map(|p| p.value), Some(1));
    }

    #[derive(Debug, Clone, Eq, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    #[test]
    fn test_lru_complex_values() {
        let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
        let fruit = |val: i32, description: &str| ComplexValue {
            val,
            description: String::from(description),
        };
        cache.put(String::from("apple"), fruit(1, "First fruit"));
        cache.put(String::from("banana"), fruit(2, "Second fruit"));
        assert_eq!(cache.get("apple").unwrap().val, 1);
        assert_eq!(cache.get("banana").unwrap().val, 2);
        let evicted = cache.put(String::from("cherry"), fruit(3, "Third fruit"));
        assert_eq!(
            evicted,
            Some(Pair::new(String::from("apple"), fruit(1, "First fruit")))
        );
        assert_eq!(cache.remove("apple"), None);
    }

    #[test]
    fn test_lru_sentinel_lookup() {
        let mut cache = LruCache::try_new(2).unwrap();
        cache.put(1, 10_i64);
        assert_eq!(cache.get_or_sentinel(&1), 10);
        assert_eq!(cache.get_or_sentinel(&2), crate::NOT_FOUND);
        assert!(LruCache::<u32, i64>::try_new(0).is_err());
    }

    #[test]
    fn test_lru_tail_is_least_recently_touched() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut cache = LruCache::new(NonZeroUsize::new(4).unwrap());
        let mut rng = StdRng::seed_from_u64(7);
        let mut touched: Vec<u64> = Vec::new();
        for _ in 0..300 {
            let key = rng.gen_range(0..8_u64);
            if rng.gen_ratio(1, 3) {
                if cache.get(&key).is_none() {
                    continue;
                }
            } else {
                cache.put(key, key * 10);
            }
            touched.retain(|k| *k != key);
            touched.insert(0, key);
            touched.truncate(4);

            cache.assert_consistent();
            assert_eq!(keys(&cache), touched);
        }
    }

    #[test]
    fn test_lru_front_mut() {
        let mut cache = LruCache::try_new(2).unwrap();
        assert_eq!(cache.front_mut(), None);
        cache.put("a", 1);
        cache.put("b", 2);
        if let Some((key, value)) = cache.front_mut() {
            assert_eq!(*key, "b");
            *value = 20;
        }
        assert_eq!(cache.peek(&"b"), Some(&20));
        assert_eq!(cache.back(), Some((&"a", &1)));
    }

    #[test]
    fn test_lru_stale_handle_is_dropped_from_map() {
        let mut cache = LruCache::try_new(3).unwrap();
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);

        // Unlink nodes behind the map's back.
        let handle = cache.map[&1];
        cache.list.remove_node(handle).unwrap();
        let handle = cache.map[&2];
        cache.list.remove_node(handle).unwrap();

        assert_eq!(cache.get(&1), None);
        assert!(!cache.contains(&1));
        assert_eq!(cache.get_mut(&2), None);
        assert!(!cache.contains(&2));
        assert_eq!(cache.len(), 1);
        cache.assert_consistent();

        cache.put(1, 11);
        assert_eq!(cache.get(&1), Some(&11));
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_concurrent_access() {
        use std::sync::{Arc, Mutex};
        use std::thread;

        let cache = Arc::new(Mutex::new(LruCache::new(NonZeroUsize::new(100).unwrap())));
        let num_threads = 4;
        let ops_per_thread = 100;

        let mut handles: Vec<thread::JoinHandle<()>> = Vec::new();

        for t in 0..num_threads {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    let mut guard = cache.lock().unwrap();
                    guard.put(key.clone(), t * 1000 + i);
                    let _ = guard.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock().unwrap();
        assert!(guard.len() <= 100);
        assert!(!guard.is_empty());
        guard.assert_consistent();
    }
}
