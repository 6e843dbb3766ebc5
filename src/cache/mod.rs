//! Bounded caches with recency-based eviction.

pub mod lru;

pub use lru::LruCache;
