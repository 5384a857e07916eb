//! Namespaced key-value cache for client state.
//!
//! Values are serialized to JSON and kept either in memory or in a directory
//! with one file per key. The storefront uses it to keep the cart between
//! runs.
//!
//! # Example
//!
//! ```rust
//! use medishop_cache::{cache_key, Cache};
//!
//! let cache = Cache::open_default();
//! let key = cache_key!("medishop", "cart");
//!
//! cache.set(&key, &vec!["item"]).unwrap();
//! let items: Option<Vec<String>> = cache.get(&key).unwrap();
//! assert_eq!(items, Some(vec!["item".to_string()]));
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

