//! Error types.
//!
//! Misses are not errors: lookups that find nothing return `None`. A
//! [`CacheError`] is only produced for invalid construction parameters and
//! for node handles that no longer refer to a live list node.

use crate::list::NodeHandle;

/// Errors reported by the list and the caches built on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The handle refers to a node that was removed (or never existed).
    ///
    /// The list is left untouched when this is returned.
    #[error("no live node for handle {0:?}")]
    NodeNotFound(NodeHandle),

    /// A cache was configured with a capacity of zero.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,

    /// A multi-generational cache was configured with zero generations.
    #[error("generation count must be greater than zero")]
    ZeroGenerations,
}
