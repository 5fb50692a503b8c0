use thiserror::Error;

/// Errors returned by cache operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
   /// `remove` was called for a key the cache does not hold.
   #[error("no entry found for key")]
   NotFound,
   /// The cache was constructed with a capacity of zero.
   #[error("cache capacity must be greater than zero")]
   InvalidCapacity,
   /// Index and recency order disagree. Never returned by a healthy cache.
   #[error("cache invariant violated: {0}")]
   Inconsistent(&'static str),
}
