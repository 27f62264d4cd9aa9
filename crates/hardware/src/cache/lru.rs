//! Least Recently Used (LRU) victim selection.
//!
//! Recency is tracked with a global logical clock: every access stamps the
//! touched line with a fresh, strictly increasing counter. The victim is the
//! line with the smallest stamp. Lines that were never filled carry a stamp of
//! zero and therefore win over any filled line.
//!
//! # Tie-breaking
//!
//! The scan always visits every way of the set, left to right, and only
//! replaces the current candidate on a strictly smaller stamp. Among equal
//! stamps (only possible between invalid lines) the lowest way wins.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per miss, where W is the associativity
//! - **Space Complexity:** one `u64` stamp per line

use super::line::CacheLine;

/// Returns the way to evict from `set`.
///
/// `set` must not be empty; geometry validation guarantees at least one way.
pub fn select_victim(set: &[CacheLine]) -> usize {
    let (victim, _) = set
        .iter()
        .enumerate()
        .fold((0, u64::MAX), |(best_way, best_stamp), (way, line)| {
            let stamp = line.recency();
            if stamp < best_stamp {
                (way, stamp)
            } else {
                (best_way, best_stamp)
            }
        });
    victim
}
