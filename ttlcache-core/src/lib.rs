//! # TTL Cache Core
//!
//! An in-process key/value store with per-entry time-to-live (TTL).
//!
//! ## Features
//!
//! - Entries own their value behind their own lock, so updating one entry
//!   never serializes against operations on other entries
//! - Expiration checked on every lookup (lazy expiration)
//! - Background sweep task per store that physically removes expired entries
//! - Pluggable identifier generation through [`IdGenerator`]
//!
//! ## Lock ordering
//!
//! The store lock is never held while an entry's value lock is acquired.
//! Expiration checks read the entry's immutable deadline and take no lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ttlcache_core::{Entry, Store, StoreConfig};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Store::with_config(
//!         StoreConfig::default().with_cleanup_interval(Duration::from_secs(30)),
//!     );
//!
//!     // Store a value with a 60 second TTL
//!     let entry = Arc::new(Entry::new("John Doe", Duration::from_secs(60)));
//!     store.set(Arc::clone(&entry));
//!
//!     // Update it in place, without touching the store lock
//!     entry.set_value("Jane Doe");
//!
//!     if let Some(found) = store.get(&entry.id()) {
//!         println!("User: {:?}", found.value());
//!     }
//!
//!     store.delete(&entry.id());
//!
//!     // Stop the background sweep on shutdown
//!     store.stop_cleanup();
//! }
//! ```

mod config;
mod entry;
mod error;
mod id;
mod store;

pub use config::StoreConfig;
pub use entry::{Entry, MAX_TTL};
pub use error::StoreError;
pub use id::{EntryId, IdGenerator, RandomIds, SequentialIds};
pub use store::Store;

// Re-exported so callers can name the value type without a direct dependency
pub use bytes::Bytes;
