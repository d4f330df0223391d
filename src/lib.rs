//! timein library
//!
//! Resolves a place name to its current local time through a persistent LRU
//! timezone cache. Exposed as a library so integration tests can drive the
//! resolver and store directly.

pub mod cache;
pub mod cli;
pub mod lookup;
pub mod output;
pub mod resolver;
