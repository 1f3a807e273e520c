//! Cache module for storing API responses
//!
//! This module provides a two-tier cache: a fast in-process map backed by a
//! durable key-value store. Entries expire after a fixed TTL and are purged
//! lazily from both tiers the next time they are read.

mod durable;
mod store;

pub use durable::{DurableStore, FileStore, MemoryStore};
pub use store::{CacheError, CacheStore, DEFAULT_TTL};
