//! Set-Associative Cache Model.
//!
//! This module implements the cache replayed by the simulator. It models a
//! write-back, write-allocate cache with LRU replacement:
//! 1. **Lookup:** The address is decoded and every way of its set is searched.
//! 2. **Hit:** The line is refreshed and marked dirty (hits are treated as writes).
//! 3. **Miss:** A victim is chosen by [`lru::select_victim`], written back if
//!    dirty, and overwritten with a clean copy of the requested block.
//!
//! All lines live in one flat vector indexed by `set * associativity + way`.

/// Cache line state.
pub mod line;

/// LRU victim selection.
pub mod lru;

use std::fmt;

use serde::Serialize;

pub use self::line::CacheLine;
use crate::config::CacheGeometry;
use crate::stats::SimStats;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The block was resident.
    Hit,
    /// The block was installed into an empty line.
    MissNoEvict,
    /// The block was installed over a valid line, which was evicted.
    MissEvict,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` if the access evicted a line.
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict)
    }
}

impl fmt::Display for Outcome {
    /// Formats the outcome the way verbose traces print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::MissNoEvict => write!(f, "miss"),
            Self::MissEvict => write!(f, "miss eviction"),
        }
    }
}

/// Set-associative cache with LRU replacement.
///
/// The geometry is fixed at construction; only line contents change while a
/// trace is replayed.
#[derive(Debug, Clone)]
pub struct Cache {
    geometry: CacheGeometry,
    lines: Vec<CacheLine>,
    clock: u64,
}

impl Cache {
    /// Allocates a cache with every line invalid and clean.
    ///
    /// The allocation is sized once from `geometry` and never grows.
    pub fn new(geometry: CacheGeometry) -> Self {
        tracing::debug!(
            sets = geometry.num_sets(),
            ways = geometry.associativity(),
            block_size = geometry.block_size(),
            "allocating cache"
        );
        Self {
            geometry,
            lines: vec![CacheLine::default(); geometry.total_lines()],
            clock: 0,
        }
    }

    /// Returns the geometry the cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Current value of the logical clock (number of accesses performed).
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Returns the lines of set `set_index` in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is not below `geometry().num_sets()`.
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let ways = self.geometry.associativity();
        let base = set_index * ways;
        &self.lines[base..base + ways]
    }

    /// Checks if the block containing `addr` is resident.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.geometry.decode(addr);
        self.set(decoded.set_index)
            .iter()
            .any(|line| line.holds(decoded.tag))
    }

    /// Number of valid dirty lines across the whole cache.
    pub fn dirty_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.valid && l.dirty).count()
    }

    /// Accesses the block containing `addr`, updating `stats`.
    ///
    /// On a hit the line's usage counter is refreshed and the line becomes
    /// dirty. On a miss the LRU way is overwritten with a clean copy of the
    /// block; if that way held a valid block it is counted as an eviction, and
    /// its bytes move from `active_dirty_bytes` to `evicted_dirty_bytes` when
    /// it was dirty.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address to access
    /// * `stats` - Counters to update
    ///
    /// # Returns
    ///
    /// The [`Outcome`] of the access.
    pub fn access(&mut self, addr: u64, stats: &mut SimStats) -> Outcome {
        let decoded = self.geometry.decode(addr);
        let ways = self.geometry.associativity();
        let block_size = self.geometry.block_size();
        let base = decoded.set_index * ways;
        let set = &mut self.lines[base..base + ways];

        if let Some(line) = set.iter_mut().find(|line| line.holds(decoded.tag)) {
            stats.hits += 1;
            self.clock += 1;
            line.usage_counter = self.clock;
            if !line.dirty {
                line.dirty = true;
                stats.active_dirty_bytes += block_size;
            }
            tracing::trace!(addr, set = decoded.set_index, tag = decoded.tag, "hit");
            return Outcome::Hit;
        }

        stats.misses += 1;
        let way = lru::select_victim(set);
        let victim = &mut set[way];

        let outcome = if victim.valid {
            stats.evictions += 1;
            if victim.dirty {
                stats.evicted_dirty_bytes += block_size;
                stats.active_dirty_bytes -= block_size;
            }
            Outcome::MissEvict
        } else {
            Outcome::MissNoEvict
        };

        self.clock += 1;
        *victim = CacheLine {
            valid: true,
            tag: decoded.tag,
            usage_counter: self.clock,
            dirty: false,
        };

        tracing::trace!(
            addr,
            set = decoded.set_index,
            tag = decoded.tag,
            way,
            evicted = outcome.is_eviction(),
            "miss"
        );
        outcome
    }
}
