//! Cache Access Unit Tests.
//!
//! Verifies the set-associative cache model in isolation: cold misses, warm
//! hits, block-offset aliasing, conflict evictions and the logical clock.
//!
//! The cache is constructed directly from a geometry; no trace is involved.

use csim_core::cache::{Cache, Outcome};
use csim_core::stats::SimStats;

use crate::common::harness::geometry;

// ──────────────────────────────────────────────────────────
// Helper: build a simple test cache
// ──────────────────────────────────────────────────────────

/// Creates a small, deterministic test cache.
///
/// 2 set bits, 4 block bits, 2 ways:
///   - num_sets   = 4
///   - block_size = 16
///
/// Set index = (addr >> 4) & 0b11
/// Tag       = addr >> 6
fn test_cache() -> Cache {
    Cache::new(geometry(2, 4, 2))
}

// ══════════════════════════════════════════════════════════
// 1. Cold Miss
// ══════════════════════════════════════════════════════════

/// First access to any address is a compulsory miss into an empty line.
#[test]
fn cold_miss_installs_without_eviction() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    assert_eq!(cache.access(0x1000, &mut stats), Outcome::MissNoEvict);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.evictions, 0);
    assert!(cache.contains(0x1000));
}

/// A freshly installed line is clean.
#[test]
fn install_leaves_line_clean() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    let _ = cache.access(0x40, &mut stats);
    assert_eq!(cache.dirty_lines(), 0);
    assert_eq!(stats.active_dirty_bytes, 0);
}

// ══════════════════════════════════════════════════════════
// 2. Warm Hit
// ══════════════════════════════════════════════════════════

/// Second access to the same address hits.
#[test]
fn warm_access_hits() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    let _ = cache.access(0x1000, &mut stats);
    assert_eq!(cache.access(0x1000, &mut stats), Outcome::Hit);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

/// Any byte of a resident block hits.
#[test]
fn same_block_different_offset_hits() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    let _ = cache.access(0x1000, &mut stats);
    assert_eq!(cache.access(0x100F, &mut stats), Outcome::Hit);
    assert_eq!(
        cache.access(0x1010, &mut stats),
        Outcome::MissNoEvict,
        "next block maps to the next set"
    );
}

// ══════════════════════════════════════════════════════════
// 3. Set Conflict Eviction
// ══════════════════════════════════════════════════════════

/// Filling both ways of a set and touching a third tag evicts.
#[test]
fn third_tag_in_set_evicts() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    // All map to set 0 with tags 0, 1, 2.
    assert_eq!(cache.access(0x00, &mut stats), Outcome::MissNoEvict);
    assert_eq!(cache.access(0x40, &mut stats), Outcome::MissNoEvict);
    assert_eq!(cache.access(0x80, &mut stats), Outcome::MissEvict);

    assert_eq!(stats.misses, 3);
    assert_eq!(stats.evictions, 1);
    assert!(!cache.contains(0x00));
    assert!(cache.contains(0x40));
    assert!(cache.contains(0x80));
}

/// Different sets never conflict with each other.
#[test]
fn distinct_sets_do_not_conflict() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    for set in 0..4u64 {
        let _ = cache.access(set << 4, &mut stats);
        let _ = cache.access((set << 4) | 0x40, &mut stats);
    }
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.misses, 8);
}

/// Tags never duplicate within a set.
#[test]
fn tag_is_unique_within_set() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    for addr in [0x00, 0x40, 0x00, 0x80, 0x40, 0x00] {
        let _ = cache.access(addr, &mut stats);
    }
    let set = cache.set(0);
    let valid: Vec<u64> = set.iter().filter(|l| l.valid).map(|l| l.tag).collect();
    let mut dedup = valid.clone();
    dedup.sort_unstable();
    dedup.dedup();
    assert_eq!(valid.len(), dedup.len());
}

// ══════════════════════════════════════════════════════════
// 4. Logical Clock
// ══════════════════════════════════════════════════════════

/// The clock advances once per access, hit or miss.
#[test]
fn clock_ticks_once_per_access() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    let _ = cache.access(0x00, &mut stats);
    let _ = cache.access(0x00, &mut stats);
    let _ = cache.access(0x40, &mut stats);
    assert_eq!(cache.clock(), 3);
}

/// Usage counters carry the timestamp of the most recent access.
#[test]
fn usage_counter_tracks_last_access() {
    let mut cache = test_cache();
    let mut stats = SimStats::default();

    let _ = cache.access(0x00, &mut stats); // t=1, way 0
    let _ = cache.access(0x40, &mut stats); // t=2, way 1
    let _ = cache.access(0x00, &mut stats); // t=3, way 0 refreshed

    let set = cache.set(0);
    assert_eq!(set[0].usage_counter, 3);
    assert_eq!(set[1].usage_counter, 2);
}

// ══════════════════════════════════════════════════════════
// 5. Full-width geometry
// ══════════════════════════════════════════════════════════

/// When set and block bits cover the whole address, every address has tag 0.
#[test]
fn full_width_geometry_decodes_without_overflow() {
    let mut cache = Cache::new(geometry(8, 56, 1));
    let mut stats = SimStats::default();

    assert_eq!(cache.access(u64::MAX, &mut stats), Outcome::MissNoEvict);
    assert_eq!(cache.access(u64::MAX - 1, &mut stats), Outcome::Hit);
}
