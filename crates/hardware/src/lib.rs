//! Trace-driven cache simulator library.
//!
//! This crate replays valgrind memory traces against a set-associative cache
//! and reports what a write-back, write-allocate LRU cache would have done:
//! 1. **Cache:** Lines, sets, LRU victim selection and dirty-byte accounting.
//! 2. **Simulation:** Trace reading, event dispatch and repeated-access detection.
//! 3. **Configuration:** Geometry validation and JSON config loading.
//! 4. **Statistics:** Run counters and their textual summaries.

/// Set-associative cache model (lines, LRU, access).
pub mod cache;
/// Common types (address decoding, trace events, errors).
pub mod common;
/// Simulator configuration and validated geometry.
pub mod config;
/// Trace reader, repeat detector and replay driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Set-associative cache; construct with `Cache::new`.
pub use crate::cache::{Cache, Outcome};
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::{CacheConfig, CacheGeometry, Config};
/// Replay driver; feed it events and call `finish`.
pub use crate::sim::Simulator;
/// Final counters of a run.
pub use crate::stats::SimStats;
