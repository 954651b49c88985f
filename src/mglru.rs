//! Multi-Generational LRU (MGLRU) Cache Implementation
//!
//! MGLRU chains several fixed-capacity LRU caches ("generations") so that an
//! entry evicted from one generation is not dropped but offered to the next,
//! older generation. Only an entry pushed out of the oldest generation leaves
//! the cache.
//!
//! # How the Algorithm Works
//!
//! ## Generation Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                              MGLRU Cache                                     │
//! │                                                                              │
//! │  keys: key ──▶ generation index                                              │
//! │                                                                              │
//! │   insert / promote                                                           │
//! │        │                                                                     │
//! │        ▼                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────────────┐    │
//! │  │ GENERATION 0 (youngest)   MRU ◀──▶ [a] ◀──▶ [b] ◀──▶ [c] LRU        │    │
//! │  └─────────────────────────────────────────────────────────────┬───────┘    │
//! │                                                     cascade ▼  │             │
//! │  ┌─────────────────────────────────────────────────────────────┴───────┐    │
//! │  │ GENERATION 1              MRU ◀──▶ [d] ◀──▶ [e] ◀──▶ [f] LRU        │    │
//! │  └─────────────────────────────────────────────────────────────┬───────┘    │
//! │                                                     cascade ▼  │             │
//! │  ┌─────────────────────────────────────────────────────────────┴───────┐    │
//! │  │ GENERATION N-1 (oldest)   MRU ◀──▶ [g] ◀──▶ [h] ◀──▶ [i] LRU        │────┼──▶ evicted
//! │  └─────────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cascading Insertion
//!
//! A new entry is put at the front of generation 0. If generation 0 was full,
//! its least recently used entry is bumped out and put at the front of
//! generation 1, and so on. The chain stops at the first generation that had
//! room. An entry bumped out of the oldest generation is returned to the
//! caller. The key map is updated at every hop.
//!
//! ## Promotion
//!
//! `get`, `promote` and a `put` of a resident key remove the entry from its
//! generation and run the cascading insertion again from generation 0. The
//! removal frees a slot in the source generation, so the cascade stops there
//! at the latest and promotion never evicts anything from the cache.
//!
//! A key's generation index only ever drops to 0 (promotion) or the key
//! leaves the cache. Keys age toward older generations only as a side effect
//! of other keys being inserted or promoted ahead of them.
//!
//! ## Example Trace
//!
//! Two generations of capacity two:
//!
//! ```text
//! put(1)  gen0=[1]        gen1=[]
//! put(2)  gen0=[2, 1]     gen1=[]
//! get(1)  gen0=[1, 2]     gen1=[]
//! put(3)  gen0=[3, 1]     gen1=[2]
//! put(4)  gen0=[4, 3]     gen1=[1, 2]
//! put(5)  gen0=[5, 4]     gen1=[3, 1]      → 2 evicted
//! get(3)  gen0=[3, 5]     gen1=[4, 1]
//! ```
//!
//! # Performance Characteristics
//!
//! | Operation | Time |
//! |-----------|------|
//! | `get` / `promote` | O(generation index of the key) |
//! | `put` | O(number of generations) worst case |
//! | `remove` / `peek` / `contains` | O(1) |
//!
//! # Thread Safety
//!
//! `MglruCache` is **not thread-safe**. A cascade touches several generations
//! and the key map in one call, so concurrent use needs one lock around the
//! whole cache; see `ConcurrentMglruCache` (requires the `concurrent` feature).

use crate::config::MglruCacheConfig;
use crate::entry::Pair;
use crate::error::CacheError;
use crate::lru::{self, LruCache};
use crate::snapshot::{GenerationSnapshot, MglruSnapshot};
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use core::slice;
use log::{debug, trace, warn};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A multi-generational LRU cache.
///
/// Holds `generations` LRU caches of `capacity` entries each, youngest first,
/// plus a map from every resident key to the generation holding it.
///
/// # Examples
///
/// ```
/// use mglru_cache::{MglruCache, Pair};
/// use core::num::NonZeroUsize;
///
/// let mut cache = MglruCache::new(
///     NonZeroUsize::new(2).unwrap(), // generations
///     NonZeroUsize::new(2).unwrap(), // capacity per generation
/// );
///
/// for key in 1..=4 {
///     assert_eq!(cache.put(key, key * 10), None);
/// }
/// // Keys 1 and 2 were cascaded into generation 1
/// assert_eq!(cache.generation_of(&1), Some(1));
///
/// // Reading promotes back to generation 0
/// assert_eq!(cache.get(&1), Some(&10));
/// assert_eq!(cache.generation_of(&1), Some(0));
///
/// // A fifth key pushes the oldest entry out of the cache
/// assert_eq!(cache.put(5, 50), Some(Pair::new(2, 20)));
/// assert_eq!(cache.len(), 4);
/// ```
pub struct MglruCache<K, V, S = DefaultHashBuilder> {
    config: MglruCacheConfig,
    generations: Vec<LruCache<K, V, S>>,
    keys: HashMap<K, usize, S>,
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher + Clone> MglruCache<K, V, S> {
    /// Creates a new cache from a configuration and a hash builder.
    ///
    /// The hash builder is cloned for each generation.
    pub fn with_hasher(config: MglruCacheConfig, hash_builder: S) -> Self {
        let generations = (0..config.generations.get())
            .map(|_| LruCache::with_hasher(config.capacity, hash_builder.clone()))
            .collect();
        MglruCache {
            config,
            generations,
            keys: HashMap::with_capacity_and_hasher(config.total_capacity(), hash_builder),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> MglruCache<K, V, S> {
    /// Number of generations.
    #[inline]
    pub fn generation_count(&self) -> NonZeroUsize {
        self.config.generations
    }

    /// Capacity of each generation.
    #[inline]
    pub fn generation_capacity(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Maximum number of entries across all generations.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.total_capacity()
    }

    /// Returns the number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the value for `key`, promoting it to the front of generation 0.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.promote(key) {
            return None;
        }
        self.generations[0].get(key)
    }

    /// Mutable variant of [`get`](Self::get). Promotes the key as well.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if !self.promote(key) {
            return None;
        }
        self.generations[0].get_mut(key)
    }

    /// Returns the value for `key` without promoting it or changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let generation = *self.keys.get(key)?;
        self.generations[generation].peek(key)
    }

    /// Returns true if `key` is resident in any generation.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.keys.contains_key(key)
    }

    /// Index of the generation holding `key`, 0 being the youngest.
    #[inline]
    pub fn generation_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.keys.get(key).copied()
    }

    /// Moves `key` to the front of generation 0 without reading it.
    ///
    /// Returns false if the key is not resident.
    pub fn promote<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(generation) = self.keys.get(key).copied() else {
            return false;
        };
        let Some(pair) = self.generations[generation].remove(key) else {
            warn!("key map points at generation {generation} which does not hold the key");
            self.keys.remove(key);
            return false;
        };
        let evicted = self.cascade(pair);
        debug_assert!(evicted.is_none(), "promotion must not evict");
        true
    }

    /// Inserts a key-value pair.
    ///
    /// A new key enters the front of generation 0 and cascades as described in
    /// the [module documentation](self). The entry pushed out of the oldest
    /// generation, if any, is returned.
    ///
    /// A resident key has its value replaced and is promoted to generation 0;
    /// nothing is evicted in that case and `None` is returned.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<Pair<K, V>> {
        self.put_pair(Pair::new(key, value))
    }

    /// Inserts an entry. See [`put`](Self::put).
    pub fn put_pair(&mut self, pair: Pair<K, V>) -> Option<Pair<K, V>> {
        if let Some(generation) = self.keys.get(&pair.key).copied() {
            match self.generations[generation].remove(&pair.key) {
                Some(_) => debug!("resident key in generation {generation} promoted by put"),
                None => warn!(
                    "key map points at generation {generation} which does not hold the key"
                ),
            }
        }
        self.cascade(pair)
    }

    /// Removes `key` from whichever generation holds it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let generation = self.keys.remove(key)?;
        self.generations[generation].remove(key)
    }

    /// The most recently used entry of generation 0.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.generations.first()?.front()
    }

    /// Mutable access to the value at the front of generation 0. That entry is
    /// already the youngest, so nothing moves.
    pub fn front_mut(&mut self) -> Option<(&K, &mut V)> {
        self.generations.first_mut()?.front_mut()
    }

    /// Promotes the first entry, youngest to oldest, for which `pred` holds.
    ///
    /// Returns `false` when no entry matches. Like [`promote`](Self::promote),
    /// this never evicts.
    pub fn promote_where<F>(&mut self, mut pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        let Some(key) = self
            .iter()
            .find(|&(key, value)| pred(key, value))
            .map(|(key, _)| key.clone())
        else {
            return false;
        };
        self.promote(&key)
    }

    /// Iterates over all entries, youngest generation first and most recently
    /// used first inside each generation.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            generations: self.generations.iter(),
            current: None,
        }
    }

    /// Removes every entry from every generation.
    pub fn clear(&mut self) {
        for generation in &mut self.generations {
            generation.clear();
        }
        self.keys.clear();
    }

    /// Captures the contents of every generation without touching recency.
    pub fn snapshot(&self) -> MglruSnapshot<K, V>
    where
        V: Clone,
    {
        let generations = self
            .generations
            .iter()
            .enumerate()
            .map(|(index, generation)| GenerationSnapshot {
                index,
                capacity: generation.cap().get(),
                entries: generation
                    .iter()
                    .map(|(key, value)| Pair::new(key.clone(), value.clone()))
                    .collect(),
            })
            .collect();
        MglruSnapshot { generations }
    }

    /// Puts `pair` at the front of generation 0 and pushes bumped entries down
    /// the chain. Returns the entry that fell off the oldest generation.
    fn cascade(&mut self, pair: Pair<K, V>) -> Option<Pair<K, V>> {
        let mut current = pair;
        for (index, generation) in self.generations.iter_mut().enumerate() {
            let key = current.key.clone();
            let bumped = generation.put_pair(current);
            self.keys.insert(key, index);
            match bumped {
                Some(bumped) => {
                    trace!("generation {index} full, cascading its least recently used entry");
                    current = bumped;
                }
                None => return None,
            }
        }
        debug!(
            "entry evicted from oldest generation {}",
            self.generations.len() - 1
        );
        self.keys.remove(&current.key);
        Some(current)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self)
    where
        K: core::fmt::Debug,
    {
        let mut resident = 0;
        for (index, generation) in self.generations.iter().enumerate() {
            generation.assert_consistent();
            for (key, _) in generation.iter() {
                assert_eq!(self.keys.get(key), Some(&index));
            }
            resident += generation.len();
        }
        assert_eq!(resident, self.keys.len());
        assert!(resident <= self.capacity());
    }
}

impl<K: Hash + Eq + Clone, V> MglruCache<K, V> {
    /// Creates a cache of `generations` LRU generations holding `capacity`
    /// entries each.
    pub fn new(
        generations: NonZeroUsize,
        capacity: NonZeroUsize,
    ) -> MglruCache<K, V, DefaultHashBuilder> {
        MglruCache::init(
            MglruCacheConfig {
                generations,
                capacity,
            },
            None,
        )
    }

    /// Creates a cache from plain integers, rejecting zero for either size.
    ///
    /// ```
    /// use mglru_cache::{CacheError, MglruCache};
    ///
    /// assert!(MglruCache::<u32, i64>::try_new(3, 16).is_ok());
    /// assert_eq!(
    ///     MglruCache::<u32, i64>::try_new(0, 16).unwrap_err(),
    ///     CacheError::ZeroGenerations
    /// );
    /// ```
    pub fn try_new(
        generations: usize,
        capacity: usize,
    ) -> Result<MglruCache<K, V, DefaultHashBuilder>, CacheError> {
        let config = MglruCacheConfig::try_new(generations, capacity)?;
        Ok(MglruCache::init(config, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// This is the **recommended** way to create a cache.
    ///
    /// ```
    /// use mglru_cache::config::MglruCacheConfig;
    /// use mglru_cache::MglruCache;
    /// use core::num::NonZeroUsize;
    ///
    /// let config = MglruCacheConfig {
    ///     generations: NonZeroUsize::new(3).unwrap(),
    ///     capacity: NonZeroUsize::new(100).unwrap(),
    /// };
    /// let cache: MglruCache<String, Vec<u8>> = MglruCache::init(config, None);
    /// assert_eq!(cache.capacity(), 300);
    /// ```
    pub fn init(
        config: MglruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> MglruCache<K, V, DefaultHashBuilder> {
        MglruCache::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher> MglruCache<K, i64, S> {
    /// Integer-valued lookup returning [`NOT_FOUND`](crate::NOT_FOUND) on a
    /// miss. Promotes on a hit, like [`get`](Self::get).
    pub fn get_or_sentinel<Q>(&mut self, key: &Q) -> i64
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).copied().unwrap_or(crate::NOT_FOUND)
    }
}

impl<K, V, S> fmt::Debug for MglruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MglruCache")
            .field("generations", &self.config.generations)
            .field("capacity", &self.config.capacity)
            .field("len", &self.keys.len())
            .finish()
    }
}

/// Iterator over an [`MglruCache`], youngest generation first.
pub struct Iter<'a, K, V, S> {
    generations: slice::Iter<'a, LruCache<K, V, S>>,
    current: Option<lru::Iter<'a, K, V>>,
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(|entries| entries.next()) {
                return Some(item);
            }
            self.current = Some(self.generations.next()?.iter());
        }
    }
}

impl<K, V, S> fmt::Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("generations_left", &self.generations.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq + Clone, V, S: BuildHasher> IntoIterator for &'a MglruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn make_mglru<K: Hash + Eq + Clone, V>(generations: usize, capacity: usize) -> MglruCache<K, V> {
        MglruCache::try_new(generations, capacity).unwrap()
    }

    fn layout(cache: &MglruCache<i32, i32>) -> Vec<Vec<i32>> {
        cache
            .snapshot()
            .generations
            .into_iter()
            .map(|generation| generation.entries.into_iter().map(|p| p.key).collect())
            .collect()
    }

    #[test]
    fn test_mglru_basic_put_get() {
        let mut cache = make_mglru(2, 1);
        assert_eq!(cache.put(1, 10), None);
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.put(2, 20), None);
        assert_eq!(cache.get(&2), Some(&20));
        assert_eq!(cache.len(), 2);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_single_generation_single_slot() {
        let mut cache = make_mglru(1, 1);
        assert_eq!(cache.put(1, 10), None);
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.put(2, 20), Some(Pair::new(1, 10)));
        assert_eq!(cache.get(&2), Some(&20));
        assert_eq!(cache.get(&1), None);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_cascade_trace() {
        let mut cache = make_mglru(2, 2);
        assert_eq!(cache.put(1, 10), None);
        assert_eq!(cache.put(2, 20), None);
        assert_eq!(cache.get(&1), Some(&10));
        assert_eq!(cache.front(), Some((&1, &10)));
        assert_eq!(layout(&cache), vec![vec![1, 2], vec![]]);

        assert_eq!(cache.put(3, 30), None);
        assert_eq!(layout(&cache), vec![vec![3, 1], vec![2]]);
        assert_eq!(cache.put(4, 40), None);
        assert_eq!(layout(&cache), vec![vec![4, 3], vec![1, 2]]);

        assert_eq!(cache.put(5, 50), Some(Pair::new(2, 20)));
        assert_eq!(layout(&cache), vec![vec![5, 4], vec![3, 1]]);
        assert_eq!(cache.get(&2), None);

        assert_eq!(cache.get(&3), Some(&30));
        assert_eq!(cache.front(), Some((&3, &30)));
        assert_eq!(layout(&cache), vec![vec![3, 5], vec![4, 1]]);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_keys_track_generations() {
        let mut cache = make_mglru(3, 1);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        assert_eq!(cache.generation_of(&3), Some(0));
        assert_eq!(cache.generation_of(&2), Some(1));
        assert_eq!(cache.generation_of(&1), Some(2));

        assert!(cache.promote(&1));
        assert_eq!(cache.generation_of(&1), Some(0));
        assert_eq!(cache.generation_of(&3), Some(1));
        assert_eq!(cache.generation_of(&2), Some(2));
        assert!(!cache.promote(&9));
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_duplicate_put_updates_and_promotes() {
        let mut cache = make_mglru(2, 2);
        for key in 1..=4 {
            cache.put(key, key * 10);
        }
        assert_eq!(cache.generation_of(&1), Some(1));

        assert_eq!(cache.put(1, 11), None);
        assert_eq!(cache.generation_of(&1), Some(0));
        assert_eq!(cache.peek(&1), Some(&11));
        assert_eq!(cache.len(), 4);
        assert_eq!(layout(&cache), vec![vec![1, 4], vec![3, 2]]);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_promotion_never_evicts_when_full() {
        let mut cache = make_mglru(3, 2);
        for key in 0..6 {
            assert_eq!(cache.put(key, key), None);
        }
        assert_eq!(cache.len(), cache.capacity());
        for key in [0, 3, 1, 5, 0, 2, 4] {
            assert_eq!(cache.put(key, key + 100), None);
            assert_eq!(cache.len(), 6);
            assert_eq!(cache.generation_of(&key), Some(0));
            cache.assert_consistent();
        }
    }

    #[test]
    fn test_mglru_peek_does_not_promote() {
        let mut cache = make_mglru(2, 1);
        cache.put(1, 10);
        cache.put(2, 20);
        assert_eq!(cache.peek(&1), Some(&10));
        assert_eq!(cache.generation_of(&1), Some(1));
        assert!(cache.contains(&1));
        assert_eq!(cache.peek(&3), None);
    }

    #[test]
    fn test_mglru_get_mut_promotes() {
        let mut cache = make_mglru(2, 1);
        cache.put(1, 10);
        cache.put(2, 20);
        *cache.get_mut(&1).unwrap() += 5;
        assert_eq!(cache.generation_of(&1), Some(0));
        assert_eq!(cache.peek(&1), Some(&15));
        assert!(cache.get_mut(&3).is_none());
    }

    #[test]
    fn test_mglru_remove() {
        let mut cache = make_mglru(2, 2);
        for key in 1..=4 {
            cache.put(key, key * 10);
        }
        assert_eq!(cache.remove(&1), Some(Pair::new(1, 10)));
        assert_eq!(cache.remove(&1), None);
        assert!(!cache.contains(&1));
        assert_eq!(cache.len(), 3);

        // The freed slot in generation 1 absorbs the next cascade.
        assert_eq!(cache.put(5, 50), None);
        assert_eq!(layout(&cache), vec![vec![5, 4], vec![3, 2]]);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_iter_order_and_clear() {
        let mut cache = make_mglru(2, 2);
        for key in 1..=4 {
            cache.put(key, key);
        }
        let keys: Vec<i32> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![4, 3, 2, 1]);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.iter().count(), 0);
        assert_eq!(cache.front(), None);
        cache.put(7, 7);
        assert_eq!(cache.generation_of(&7), Some(0));
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_front_mut_edits_in_place() {
        let mut cache = make_mglru(2, 1);
        assert_eq!(cache.front_mut(), None);
        cache.put(1, 10);
        cache.put(2, 20);

        if let Some((key, value)) = cache.front_mut() {
            assert_eq!(*key, 2);
            *value += 5;
        }
        assert_eq!(cache.peek(&2), Some(&25));
        assert_eq!(layout(&cache), vec![vec![2], vec![1]]);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_promote_where_picks_youngest_match() {
        let mut cache = make_mglru(2, 2);
        for key in 1..=4 {
            cache.put(key, key * 10);
        }
        assert_eq!(layout(&cache), vec![vec![4, 3], vec![2, 1]]);

        // Both 2 and 1 match; 2 is younger.
        assert!(cache.promote_where(|_, value| *value <= 20));
        assert_eq!(layout(&cache), vec![vec![2, 4], vec![3, 1]]);
        assert_eq!(cache.len(), 4);

        assert!(!cache.promote_where(|key, _| *key > 100));
        assert_eq!(layout(&cache), vec![vec![2, 4], vec![3, 1]]);
        cache.assert_consistent();
    }

    #[test]
    fn test_mglru_string_keys_borrowed_lookup() {
        let mut cache = make_mglru(2, 1);
        cache.put(String::from("a"), 1);
        cache.put(String::from("b"), 2);
        assert_eq!(cache.generation_of("a"), Some(1));
        assert_eq!(cache.get("a"), Some(&1));
        assert_eq!(cache.generation_of("a"), Some(0));
        assert_eq!(cache.remove("b").map(|p| p.value), Some(2));
    }

    #[test]
    fn test_mglru_sentinel_lookup() {
        let mut cache: MglruCache<u32, i64> = make_mglru(2, 2);
        cache.put(1, 10);
        assert_eq!(cache.get_or_sentinel(&1), 10);
        assert_eq!(cache.get_or_sentinel(&2), crate::NOT_FOUND);
    }

    #[test]
    fn test_mglru_capacity_bound_under_churn() {
        let mut cache = make_mglru(4, 3);
        let mut evictions = 0;
        for key in 0..200 {
            if cache.put(key, key).is_some() {
                evictions += 1;
            }
            if key % 3 == 0 {
                let _ = cache.get(&(key / 2));
            }
            assert!(cache.len() <= 12);
            cache.assert_consistent();
        }
        assert_eq!(cache.len(), 12);
        assert_eq!(evictions, 200 - 12);
    }
}
