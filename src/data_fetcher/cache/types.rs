//! Cache abstraction injected into the match repository

use std::hash::Hash;

/// A get/put/clear key-value cache owned by a repository instance.
///
/// Implementations synchronize internally so a shared repository can be used
/// from several tasks. No implementation expires entries on its own.
pub trait KeyValueCache<K, V>: Send + Sync
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V>;

    /// Inserts or overwrites (last write wins).
    fn put(&self, key: K, value: V);

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
