pub mod lru_store;
pub mod memory;
pub mod types;
mod core;

pub use core::*;
pub use lru_store::LruCacheStore;
pub use memory::InMemoryCache;
pub use types::KeyValueCache;
