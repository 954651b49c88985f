//! Cache Configuration Module
//!
//! This module provides configuration structures for the caches in this crate.
//! Each cache type has its own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: Sizes are `NonZeroUsize`, so a zero-capacity cache cannot be configured
//! - **No boilerplate**: No constructors or builder methods needed
//!
//! # Configs
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Single-generation LRU |
//! | `MglruCacheConfig` | [`MglruCache`](crate::MglruCache) | Multi-generational LRU |
//!
//! The concurrent cache (requires the `concurrent` feature) is configured with
//! the same `MglruCacheConfig` as its single-threaded counterpart.
//!
//! # Examples
//!
//! ```
//! use mglru_cache::config::MglruCacheConfig;
//! use mglru_cache::MglruCache;
//! use core::num::NonZeroUsize;
//!
//! // Four generations of 256 entries each
//! let config = MglruCacheConfig {
//!     generations: NonZeroUsize::new(4).unwrap(),
//!     capacity: NonZeroUsize::new(256).unwrap(),
//! };
//! assert_eq!(config.total_capacity(), 1024);
//!
//! let cache: MglruCache<String, i32> = MglruCache::init(config, None);
//! ```

pub mod lru;
pub mod mglru;

pub use lru::LruCacheConfig;
pub use mglru::MglruCacheConfig;
