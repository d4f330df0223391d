//! Cache module for the persistent place→timezone store
//!
//! This module provides a bounded LRU store that persists its entries to a JSON
//! snapshot on disk after every mutation. A corrupt or missing snapshot degrades
//! to an empty store so the application can always start.

mod store;

pub use store::{StoreError, TimezoneStore, DEFAULT_CAPACITY, SNAPSHOT_FILE};
