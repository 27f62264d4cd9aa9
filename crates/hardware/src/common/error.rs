//! Error definitions.
//!
//! The cache model itself is total over its inputs and never fails. Errors only
//! arise at the edges of the simulator:
//! 1. **Configuration:** Geometry that cannot describe a cache, or an unreadable config file.
//! 2. **Trace Input:** I/O failures while opening or reading a trace.
//!
//! Malformed trace lines are not errors; they end the event stream.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a cache geometry or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The number of set-index bits was zero.
    #[error("set index bits (-s) must be greater than zero")]
    ZeroSetBits,

    /// The number of block-offset bits was zero.
    #[error("block offset bits (-b) must be greater than zero")]
    ZeroBlockBits,

    /// The associativity was zero.
    #[error("associativity (-E) must be greater than zero")]
    ZeroAssociativity,

    /// Set and block bits together exceed the 64-bit address width.
    #[error("set bits ({set_bits}) plus block bits ({block_bits}) exceed the 64-bit address width")]
    AddressBitsExceeded {
        /// Requested set-index bits.
        set_bits: u32,
        /// Requested block-offset bits.
        block_bits: u32,
    },

    /// The total number of lines does not fit in memory addressing.
    #[error("2^{set_bits} sets of {associativity} lines cannot be allocated")]
    TooManyLines {
        /// Requested set-index bits.
        set_bits: u32,
        /// Requested associativity.
        associativity: usize,
    },

    /// A configuration file could not be read.
    #[error("could not read config file '{}': {source}", path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration document was not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while reading a trace source.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("could not open trace file '{}': {source}", path.display())]
    Open {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading a line from the trace failed.
    #[error("could not read trace line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
