//! recipebox library
//!
//! Exposes the cache, the TheMealDB client and the CLI plumbing so the binary
//! and integration tests share one implementation.

pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod output;
