//! Bounded, thread-safe key/value cache with least-recently-used eviction.

use std::hash::Hash;

mod error;
mod list;
pub mod lru;

pub use error::CacheError;
pub use lru::BoundedLruCache;

pub trait Cache<K: Hash + Eq, V> {
   /// Inserts or updates `k`, marking it most recently used.
   fn set(&self, k: K, v: V) -> Result<(), CacheError>;
   /// Removes `k`, failing with [`CacheError::NotFound`] when absent.
   fn remove(&self, k: &K) -> Result<V, CacheError>;
   /// Looks `k` up; a hit counts as a use.
   fn get(&self, k: &K) -> Option<V>;
   /// Looks `k` up without touching its recency.
   fn exists(&self, k: &K) -> bool;
   fn size(&self) -> usize;
}
