//! Type-safe key-value persistence for the Bazar storefront client.
//!
//! The storefront keeps its cart and identity in a small string key-value
//! store, the same way a browser page keeps them in local storage. The
//! [`KvStore`] trait is the port; [`MemoryStore`] and [`FileStore`] are the
//! two adapters, and [`Cache`] layers JSON serialization on top.
//!
//! # Example
//!
//! ```rust
//! use bazar_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cartItems", &vec![1, 2, 3]).unwrap();
//! let items: Option<Vec<i32>> = cache.get("cartItems").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{Cache, FileStore, KvStore, MemoryStore};
pub use session::{Session, ADMIN_FLAG_KEY, USER_ID_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore, Session};
}
