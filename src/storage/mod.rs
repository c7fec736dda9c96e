//! Persistent key-value storage for user data such as favorite teams.

use std::collections::BTreeSet;

use crate::error::AppError;

pub mod favorites;
pub mod file_store;
pub mod memory_store;

pub use favorites::FavoritesStore;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Storage of string sets under fixed keys.
///
/// A key that was never written reads as an empty set.
pub trait KeyValueStore: Send + Sync {
    fn get_set(&self, key: &str) -> Result<BTreeSet<String>, AppError>;

    fn put_set(&self, key: &str, values: &BTreeSet<String>) -> Result<(), AppError>;
}
