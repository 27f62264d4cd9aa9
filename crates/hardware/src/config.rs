//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline geometry used when a value is not supplied.
//! 2. **Structures:** The raw [`CacheConfig`] and the run-level [`Config`].
//! 3. **Validation:** Conversion of a raw config into an immutable [`CacheGeometry`].
//!
//! Configuration is supplied through CLI flags, optionally layered over a JSON
//! document loaded with [`Config::from_json_file`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::CacheLine;
use crate::common::addr::{self, DecodedAddr};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default number of set-index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default number of block-offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;
}

/// Raw cache geometry as supplied by the user.
///
/// Values are not checked until [`CacheConfig::validate`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of set-index bits (`-s`).
    #[serde(default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Number of block-offset bits (`-b`).
    #[serde(default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,

    /// Lines per set (`-E`).
    #[serde(default = "CacheConfig::default_associativity", alias = "ways")]
    pub associativity: usize,
}

impl CacheConfig {
    /// Returns the default number of set-index bits.
    const fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    /// Returns the default number of block-offset bits.
    const fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Returns the default associativity.
    const fn default_associativity() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Checks the configuration and produces the geometry it describes.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when any field is zero, or when
    /// [`CacheGeometry::new`] rejects the dimensions.
    pub fn validate(&self) -> Result<CacheGeometry, ConfigError> {
        if self.set_bits == 0 {
            return Err(ConfigError::ZeroSetBits);
        }
        if self.block_bits == 0 {
            return Err(ConfigError::ZeroBlockBits);
        }
        CacheGeometry::new(self.set_bits, self.block_bits, self.associativity)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            set_bits: defaults::SET_BITS,
            block_bits: defaults::BLOCK_BITS,
            associativity: defaults::ASSOCIATIVITY,
        }
    }
}

/// Validated, immutable cache geometry.
///
/// Every instance has at least one way per set and line storage no larger than
/// the largest possible allocation. Zero set or block bits are allowed here
/// (a single set, one-byte blocks); [`CacheConfig::validate`] is the stricter
/// user-facing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    set_bits: u32,
    block_bits: u32,
    associativity: usize,
}

impl CacheGeometry {
    /// Builds a geometry from raw dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroAssociativity`] for an empty set,
    /// [`ConfigError::AddressBitsExceeded`] when the set and block bits do not
    /// fit in a 64-bit address (or the block alone spans all 64 bits), and
    /// [`ConfigError::TooManyLines`] when the line storage would exceed the
    /// largest possible allocation.
    pub fn new(set_bits: u32, block_bits: u32, associativity: usize) -> Result<Self, ConfigError> {
        if associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if block_bits >= u64::BITS || set_bits.saturating_add(block_bits) > u64::BITS {
            return Err(ConfigError::AddressBitsExceeded {
                set_bits,
                block_bits,
            });
        }
        let line_storage = 1usize
            .checked_shl(set_bits)
            .and_then(|sets| sets.checked_mul(associativity))
            .and_then(|lines| lines.checked_mul(size_of::<CacheLine>()))
            .filter(|&bytes| bytes <= isize::MAX.unsigned_abs());
        if line_storage.is_none() {
            return Err(ConfigError::TooManyLines {
                set_bits,
                associativity,
            });
        }

        Ok(Self {
            set_bits,
            block_bits,
            associativity,
        })
    }

    /// Number of set-index bits.
    #[inline]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Number of block-offset bits.
    #[inline]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Lines per set.
    #[inline]
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Number of sets, `2^set_bits`.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        1 << self.set_bits
    }

    /// Block size in bytes, `2^block_bits`.
    #[inline]
    pub const fn block_size(&self) -> u64 {
        1 << self.block_bits
    }

    /// Total number of lines across all sets.
    #[inline]
    pub const fn total_lines(&self) -> usize {
        self.num_sets() * self.associativity
    }

    /// Splits `address` into tag and set index for this geometry.
    #[inline]
    pub fn decode(&self, address: u64) -> DecodedAddr {
        addr::decode(address, self.set_bits, self.block_bits)
    }
}

/// Root configuration for a simulation run.
///
/// # Examples
///
/// ```
/// use csim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "set_bits": 2, "block_bits": 3, "associativity": 4 },
///     "trace": "traces/yi.trace",
///     "verbose": true
/// }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.associativity, 4);
/// assert!(config.verbose);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Cache geometry.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Path of the trace to replay.
    #[serde(default)]
    pub trace: Option<PathBuf>,

    /// Print each event together with its outcomes.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are not valid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
