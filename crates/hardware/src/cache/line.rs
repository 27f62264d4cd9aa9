//! Cache line state.

/// A single line of a cache set.
///
/// A line that has never been filled is invalid, clean and has a usage
/// counter of zero. Once installed it stays valid for the rest of the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block.
    pub valid: bool,
    /// Tag of the held block. Meaningless while the line is invalid.
    pub tag: u64,
    /// Logical timestamp of the last access. Zero means never used.
    pub usage_counter: u64,
    /// Whether the block was written since it was installed.
    pub dirty: bool,
}

impl CacheLine {
    /// Returns `true` if the line is valid and holds `tag`.
    #[inline(always)]
    pub const fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }

    /// Usage counter as seen by victim selection; invalid lines rank lowest.
    #[inline(always)]
    pub const fn recency(&self) -> u64 {
        if self.valid { self.usage_counter } else { 0 }
    }
}
