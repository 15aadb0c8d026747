//! Content-addressed, file-backed cache for fetched pages.
//!
//! This module provides a persistent cache keyed by a hash of the source
//! URL. It supports:
//!
//! - Content-addressed storage using SHA-256 hashing
//! - One raw-bytes file per page, named by its key
//! - An append-only `index.tsv` journal mapping keys back to URLs
//!
//! There is no eviction, no expiry, and no locking: the cache grows
//! unboundedly and staleness is the caller's concern.

pub mod hash;
pub mod store;

pub use crate::Error;

pub use hash::cache_key;
pub use store::{INDEX_FILE, PageCache};
