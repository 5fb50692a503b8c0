use crate::error::CacheError;
use crate::list::{List, NodeId};
use crate::Cache;
use log::debug;
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::mem;

struct Entry<V> {
   value: V,
   node: NodeId,
}

/// Index plus recency order, without any locking. The list holds keys from
/// most recently used (head) to least recently used (tail); every key in the
/// map owns exactly one live node in the list.
struct LRUCache<K, V> {
   map: HashMap<K, Entry<V>>,
   list: List<K>,
   cap: usize,
}

impl<K: Hash + Eq + Clone, V> LRUCache<K, V> {
   fn with_capacity(cap: usize) -> Result<Self, CacheError> {
      if cap == 0 {
         return Err(CacheError::InvalidCapacity);
      }
      Ok(Self {
         map: HashMap::with_capacity(cap),
         list: List::with_capacity(cap),
         cap,
      })
   }

   /// Inserts or updates `k`, returning the previous value on update.
   fn insert(&mut self, k: K, v: V) -> Result<Option<V>, CacheError> {
      // cache exist
      if let Some(entry) = self.map.get_mut(&k) {
         self.list.move_to_front(entry.node);
         return Ok(Some(mem::replace(&mut entry.value, v)));
      }
      // cache not exist, make room first
      if self.map.len() >= self.cap {
         self.evict()?;
      }
      let node = self.list.push_front(k.clone());
      self.map.insert(k, Entry { value: v, node });
      Ok(None)
   }

   fn get<Q>(&mut self, k: &Q) -> Option<&V>
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
   {
      let entry = self.map.get(k)?;
      self.list.move_to_front(entry.node);
      Some(&entry.value)
   }

   fn remove<Q>(&mut self, k: &Q) -> Result<V, CacheError>
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
   {
      let entry = self.map.remove(k).ok_or(CacheError::NotFound)?;
      self
         .list
         .remove_node(entry.node)
         .ok_or(CacheError::Inconsistent("removed key has no node in recency order"))?;
      Ok(entry.value)
   }

   fn contains<Q>(&self, k: &Q) -> bool
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
   {
      self.map.contains_key(k)
   }

   fn len(&self) -> usize {
      self.map.len()
   }

   /// Drops the tail of the recency order from both structures.
   fn evict(&mut self) -> Result<(K, V), CacheError> {
      let key = self
         .list
         .pop_back()
         .ok_or(CacheError::Inconsistent("no entry to evict from recency order"))?;
      let entry = self
         .map
         .remove(&key)
         .ok_or(CacheError::Inconsistent("evicted key missing from index"))?;
      Ok((key, entry.value))
   }

   #[cfg(test)]
   fn keys(&self) -> Vec<K> {
      self.list.iter().cloned().collect()
   }

   #[cfg(test)]
   fn check_invariants(&self) {
      assert_eq!(self.map.len(), self.list.len());
      assert!(self.map.len() <= self.cap);
      assert!(self.list.slots() <= self.cap);
      for key in self.list.iter() {
         let entry = self.map.get(key).expect("ordered key missing from index");
         assert!(self.list.get(entry.node) == Some(key));
      }
   }
}

/// Fixed-capacity LRU cache that can be shared between threads.
///
/// Index and recency order sit behind one exclusive lock which every
/// operation takes for its whole duration. `get` reorders entries, so it is
/// treated as a writer like `set` and `remove`; `exists` and `size` join the
/// same lock so they never see a half-applied update.
///
/// ```
/// use bounded_lru::BoundedLruCache;
///
/// let cache = BoundedLruCache::with_capacity(2).unwrap();
/// cache.set("a", 1).unwrap();
/// cache.set("b", 2).unwrap();
/// assert_eq!(cache.get(&"a"), Some(1));
/// cache.set("c", 3).unwrap();
/// assert!(!cache.exists(&"b"));
/// ```
pub struct BoundedLruCache<K, V> {
   inner: Mutex<LRUCache<K, V>>,
}

impl<K: Hash + Eq + Clone, V> BoundedLruCache<K, V> {
   /// Creates an empty cache holding at most `capacity` entries.
   ///
   /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
   pub fn with_capacity(capacity: usize) -> Result<Self, CacheError> {
      let inner = LRUCache::with_capacity(capacity)?;
      debug!("created LRU cache with capacity {}", capacity);
      Ok(Self {
         inner: Mutex::new(inner),
      })
   }

   /// Inserts `k` or replaces its value, making it the most recently used
   /// entry. Inserting a new key into a full cache evicts the least recently
   /// used entry first.
   pub fn set(&self, k: K, v: V) -> Result<(), CacheError> {
      // the replaced value is dropped after the guard
      let _old = self.inner.lock().insert(k, v)?;
      Ok(())
   }

   /// Removes `k` and hands its value back, or [`CacheError::NotFound`].
   pub fn remove<Q>(&self, k: &Q) -> Result<V, CacheError>
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
   {
      self.inner.lock().remove(k)
   }

   /// Returns a copy of the value for `k` and marks it most recently used.
   pub fn get<Q>(&self, k: &Q) -> Option<V>
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
      V: Clone,
   {
      self.inner.lock().get(k).cloned()
   }

   /// Like [`get`](Self::get), but lends the value to `f` while the lock is
   /// held instead of cloning it.
   ///
   /// The lock is not reentrant: `f` must not call back into this cache
   /// (including formatting it with `{:?}`), or the calling thread deadlocks.
   pub fn get_with<Q, R, F>(&self, k: &Q, f: F) -> Option<R>
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
      F: FnOnce(&V) -> R,
   {
      self.inner.lock().get(k).map(f)
   }

   /// Membership test. Does not count as a use.
   pub fn exists<Q>(&self, k: &Q) -> bool
   where
      K: Borrow<Q>,
      Q: Hash + Eq + ?Sized,
   {
      self.inner.lock().contains(k)
   }

   pub fn size(&self) -> usize {
      self.inner.lock().len()
   }

   pub fn capacity(&self) -> usize {
      self.inner.lock().cap
   }

   pub fn is_empty(&self) -> bool {
      self.size() == 0
   }
}

impl<K: Hash + Eq + Clone, V: Clone> Cache<K, V> for BoundedLruCache<K, V> {
   fn set(&self, k: K, v: V) -> Result<(), CacheError> {
      BoundedLruCache::set(self, k, v)
   }

   fn remove(&self, k: &K) -> Result<V, CacheError> {
      BoundedLruCache::remove(self, k)
   }

   fn get(&self, k: &K) -> Option<V> {
      BoundedLruCache::get(self, k)
   }

   fn exists(&self, k: &K) -> bool {
      BoundedLruCache::exists(self, k)
   }

   fn size(&self) -> usize {
      BoundedLruCache::size(self)
   }
}

impl<K, V> fmt::Debug for BoundedLruCache<K, V> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let inner = self.inner.lock();
      f.debug_struct("BoundedLruCache")
         .field("capacity", &inner.cap)
         .field("size", &inner.map.len())
         .finish()
   }
}
