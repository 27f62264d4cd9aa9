//! Memory Access Types.
//!
//! This module defines the classification of trace events replayed by the simulator.
//! These types are used for the following:
//! 1. **Dispatch:** Selecting how many cache accesses an event performs.
//! 2. **Trace Decoding:** Mapping the operation letter of a trace line to a kind.
//! 3. **Reporting:** Echoing events back in verbose output.

use std::fmt;

/// Kind of memory operation recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data load (`L`).
    Load,

    /// Data store (`S`).
    Store,

    /// Data modify (`M`): a load followed by a store to the same address.
    Modify,

    /// Any other operation letter, such as instruction fetches (`I`).
    ///
    /// The simulator ignores these events entirely.
    Other(char),
}

impl AccessKind {
    /// Maps a trace operation letter to its kind.
    pub const fn from_op(op: char) -> Self {
        match op {
            'L' => Self::Load,
            'S' => Self::Store,
            'M' => Self::Modify,
            other => Self::Other(other),
        }
    }

    /// Returns the trace operation letter for this kind.
    pub const fn op(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
            Self::Other(c) => c,
        }
    }
}

/// A single decoded trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessEvent {
    /// Operation kind.
    pub kind: AccessKind,
    /// Accessed address.
    pub address: u64,
    /// Access size in bytes. Not used by the cache model.
    pub size: u32,
}

impl AccessEvent {
    /// Creates an event.
    pub const fn new(kind: AccessKind, address: u64, size: u32) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }
}

impl fmt::Display for AccessEvent {
    /// Formats the event the way it appears in a trace file, e.g. `L 10,4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind.op(), self.address, self.size)
    }
}
