//! Address decomposition.
//!
//! This module splits a raw 64-bit address into the fields a set-associative
//! cache indexes by. It provides the following:
//! 1. **Decoded Address:** A strong type pairing the tag with the set index.
//! 2. **Decoding:** A pure function extracting both fields from configured bit widths.
//!
//! The low `block_bits` bits select a byte inside a block and are discarded.
//! The next `set_bits` bits select the set, and everything above is the tag.

/// An address split into the fields used for cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Address bits above the set index and block offset.
    pub tag: u64,
    /// Index of the set the address maps to.
    pub set_index: usize,
}

/// Decodes `addr` into its tag and set index.
///
/// # Arguments
///
/// * `addr` - The raw 64-bit address.
/// * `set_bits` - Number of set-index bits.
/// * `block_bits` - Number of block-offset bits.
///
/// # Returns
///
/// The [`DecodedAddr`] for `addr`. Shifts by the full address width produce
/// zero rather than overflowing, so a geometry using all 64 bits yields tag 0.
#[inline]
pub fn decode(addr: u64, set_bits: u32, block_bits: u32) -> DecodedAddr {
    let set_mask = set_mask(set_bits);
    let set_index = (addr.checked_shr(block_bits).unwrap_or(0) & set_mask) as usize;
    let tag = addr.checked_shr(set_bits.saturating_add(block_bits)).unwrap_or(0);
    DecodedAddr { tag, set_index }
}

/// Mask covering the low `set_bits` bits.
#[inline(always)]
const fn set_mask(set_bits: u32) -> u64 {
    if set_bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << set_bits) - 1
    }
}
