//! Simulator: owns the cache, the repeat detector and the counters side-by-side.
//!
//! Events are replayed strictly in order. Each event kind performs a fixed
//! sequence of cache accesses and detector observations:
//!
//! | Event    | Sequence                                              |
//! |----------|-------------------------------------------------------|
//! | `Load`   | observe, then the full `Store` sequence               |
//! | `Store`  | access, observe                                       |
//! | `Modify` | access, observe, access, observe (repeat suppressed)  |
//! | other    | nothing                                               |
//!
//! A load therefore touches the cache exactly like a store does and is
//! observed twice, so every load counts as a repeated access at least once.
//! Reference statistics depend on this ordering.

use crate::cache::{Cache, Outcome};
use crate::common::data::{AccessEvent, AccessKind};
use crate::config::CacheGeometry;
use crate::sim::detector::RepeatDetector;
use crate::stats::SimStats;

/// Cache outcomes produced by one event: none, one or two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcomes {
    outcomes: [Option<Outcome>; 2],
}

impl EventOutcomes {
    fn push(&mut self, outcome: Outcome) {
        if let Some(slot) = self.outcomes.iter_mut().find(|s| s.is_none()) {
            *slot = Some(outcome);
        }
    }

    /// Iterates over the outcomes in the order the accesses happened.
    pub fn iter(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.outcomes.iter().flatten().copied()
    }

    /// Number of cache accesses the event performed.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the event did not touch the cache.
    pub const fn is_empty(&self) -> bool {
        self.outcomes[0].is_none()
    }
}

/// Top-level simulator: cache state, repeat detector and counters.
#[derive(Debug, Clone)]
pub struct Simulator {
    cache: Cache,
    detector: RepeatDetector,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator with an empty cache of the given geometry.
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            cache: Cache::new(geometry),
            detector: RepeatDetector::new(),
            stats: SimStats::default(),
        }
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Replays one event.
    ///
    /// # Returns
    ///
    /// The cache outcomes the event produced, in order.
    pub fn process(&mut self, event: &AccessEvent) -> EventOutcomes {
        let mut outcomes = EventOutcomes::default();
        let addr = event.address;

        match event.kind {
            AccessKind::Load => {
                self.observe(addr, false);
                outcomes.push(self.store(addr));
            }
            AccessKind::Store => outcomes.push(self.store(addr)),
            AccessKind::Modify => {
                outcomes.push(self.store(addr));
                outcomes.push(self.cache.access(addr, &mut self.stats));
                self.observe(addr, true);
            }
            AccessKind::Other(_) => {}
        }
        outcomes
    }

    /// Replays every event of `events` in order.
    pub fn run<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a AccessEvent>,
    {
        for event in events {
            let _ = self.process(event);
        }
    }

    /// Ends the run and returns the final counters.
    pub fn finish(self) -> SimStats {
        self.stats
    }

    /// One cache access followed by an unsuppressed observation.
    fn store(&mut self, addr: u64) -> Outcome {
        let outcome = self.cache.access(addr, &mut self.stats);
        self.observe(addr, false);
        outcome
    }

    fn observe(&mut self, addr: u64, suppress: bool) {
        if self.detector.observe(addr, suppress) {
            self.stats.repeated_accesses += 1;
        }
    }
}
