//! Common types shared across the simulator.
//!
//! This module provides the building blocks used by the cache model, the trace
//! reader and the simulator driver. It includes:
//! 1. **Address Decoding:** Splitting raw addresses into tag and set index.
//! 2. **Memory Access:** Trace event kinds and decoded events.
//! 3. **Error Handling:** Configuration and trace input errors.

/// Address decomposition into tag and set index.
pub mod addr;

/// Trace event definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{DecodedAddr, decode};
pub use data::{AccessEvent, AccessKind};
pub use error::{ConfigError, TraceError};
