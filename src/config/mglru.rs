//! Configuration for the Multi-Generational LRU (MGLRU) cache.
//!
//! # Sizing Guidelines
//!
//! The cache holds at most `generations × capacity` entries. Every generation
//! has the same capacity.
//!
//! - **More generations**: an entry survives more rounds of contention before
//!   it is evicted, at the cost of a longer worst-case cascade (one hop per
//!   generation) on insertion.
//! - **Larger generations**: cheaper inserts, coarser aging.
//!
//! ```text
//! resident entries ≤ generations × capacity
//! worst-case insert = O(generations)
//! ```

use crate::error::CacheError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a multi-generational LRU cache.
///
/// # Fields
///
/// - `generations`: Number of chained LRU generations. Generation 0 is the
///   youngest; entries evicted from the last one leave the cache.
/// - `capacity`: Capacity of each individual generation.
///
/// # Examples
///
/// ```
/// use mglru_cache::config::MglruCacheConfig;
/// use core::num::NonZeroUsize;
///
/// let config = MglruCacheConfig {
///     generations: NonZeroUsize::new(2).unwrap(),
///     capacity: NonZeroUsize::new(2).unwrap(),
/// };
/// assert_eq!(config.total_capacity(), 4);
///
/// assert!(MglruCacheConfig::try_new(0, 2).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MglruCacheConfig {
    /// Number of generations (LRU segments) in the cache.
    pub generations: NonZeroUsize,
    /// Maximum number of entries in each generation.
    pub capacity: NonZeroUsize,
}

impl MglruCacheConfig {
    /// Builds a config from plain integers, rejecting zero for either size.
    pub fn try_new(generations: usize, capacity: usize) -> Result<Self, CacheError> {
        let generations = NonZeroUsize::new(generations).ok_or(CacheError::ZeroGenerations)?;
        let capacity = NonZeroUsize::new(capacity).ok_or(CacheError::ZeroCapacity)?;
        Ok(Self {
            generations,
            capacity,
        })
    }

    /// Maximum number of entries across all generations.
    pub fn total_capacity(&self) -> usize {
        self.generations.get().saturating_mul(self.capacity.get())
    }
}

impl fmt::Debug for MglruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MglruCacheConfig")
            .field("generations", &self.generations)
            .field("capacity", &self.capacity)
            .finish()
    }
}
