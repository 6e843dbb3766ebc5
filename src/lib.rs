//! # entrymap
//!
//! Generic key-value containers built on a shared entry-based storage seam.
//!
//! Three containers are provided:
//!
//! - [`UnorderedMap`](map::UnorderedMap): hash-backed associative map with
//!   O(1) average operations and unspecified iteration order.
//! - [`SortedMap`](map::SortedMap): associative map backed by an
//!   order-statistics tree, with O(log n) lookup, insert, delete, rank
//!   (`bisect_left` / `bisect_right`) and positional (`peekitem`) queries.
//! - [`LruCache`](cache::LruCache): bounded-capacity cache that evicts the
//!   least-recently-used entry on overflow; both reads and writes refresh
//!   recency.
//!
//! The two maps share a common contract, [`MapApi`](map::MapApi), expressed
//! as provided methods over the [`EntryStorage`](map::EntryStorage) seam, so
//! code can be written once against either backing structure.
//!
//! ## Example
//!
//! ```rust
//! use entrymap::prelude::*;
//!
//! let mut map = SortedMap::new();
//! map.insert(5, "a");
//! map.insert(1, "b");
//! map.insert(3, "c");
//!
//! assert_eq!(map.keys().collect::<Vec<_>>(), [&1, &3, &5]);
//! assert_eq!(map.bisect_left(&3), 1);
//! assert_eq!(map.bisect_right(&3), 2);
//! assert_eq!(map.peekitem(-1)?, (&5, &"a"));
//!
//! let mut cache = LruCache::new(2)?;
//! cache.insert("x", 10);
//! cache.insert("y", 20);
//! cache.insert("z", 30); // evicts "x"
//! assert!(!cache.contains_key(&"x"));
//! assert_eq!(cache.get(&"y")?, &20);
//! # Ok::<(), entrymap::MapError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod error;
pub mod map;

pub use error::{MapError, Result};

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::cache::LruCache;
    pub use crate::error::{MapError, Result};
    pub use crate::map::{Entry, EntryStorage, MapApi, SortedMap, UnorderedMap};
}
