//! SimStats unit tests.
//!
//! Verifies default initialization, derived rates and the textual and JSON
//! renderings of the final counters.

use pretty_assertions::assert_eq;

use csim_core::stats::SimStats;

fn sample() -> SimStats {
    SimStats {
        hits: 3,
        misses: 1,
        evictions: 1,
        evicted_dirty_bytes: 16,
        active_dirty_bytes: 32,
        repeated_accesses: 2,
    }
}

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.evicted_dirty_bytes, 0);
    assert_eq!(stats.active_dirty_bytes, 0);
    assert_eq!(stats.repeated_accesses, 0);
    assert_eq!(stats.accesses(), 0);
}

#[test]
fn rates_are_zero_without_accesses() {
    let stats = SimStats::default();
    assert!(stats.hit_rate().abs() < f64::EPSILON);
    assert!(stats.miss_rate().abs() < f64::EPSILON);
}

#[test]
fn rates_sum_to_hundred() {
    let stats = sample();
    assert_eq!(stats.accesses(), 4);
    assert!((stats.hit_rate() - 75.0).abs() < 1e-9);
    assert!((stats.miss_rate() - 25.0).abs() < 1e-9);
}

#[test]
fn summary_line_format() {
    assert_eq!(
        sample().to_string(),
        "hits:3 misses:1 evictions:1 dirty_bytes_in_cache:32 dirty_bytes_evicted:16 repeated_accesses:2"
    );
}

#[test]
fn render_all_sections() {
    let text = sample().render_sections(&[]);
    assert!(text.contains("ACCESS OUTCOMES"));
    assert!(text.contains("DIRTY DATA"));
    assert!(text.contains("LOCALITY"));
    assert!(text.contains("hits:3 misses:1"));
    assert!(text.contains("(75.00%)"));
}

#[test]
fn render_selected_section_only() {
    let text = sample().render_sections(&["dirty".to_string()]);
    assert!(text.contains("bytes.evicted          16"));
    assert!(!text.contains("ACCESS OUTCOMES"));
    assert!(!text.contains("LOCALITY"));
}

#[test]
fn serializes_to_json() {
    let value = serde_json::to_value(sample()).expect("stats serialize");
    assert_eq!(value["hits"], 3);
    assert_eq!(value["active_dirty_bytes"], 32);
    assert_eq!(value["repeated_accesses"], 2);
}
