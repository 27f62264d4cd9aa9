use csim_core::config::CacheGeometry;
use csim_core::sim::{EventOutcomes, Simulator, TraceReader};
use csim_core::stats::SimStats;

/// Builds a geometry, panicking on invalid dimensions.
pub fn geometry(set_bits: u32, block_bits: u32, associativity: usize) -> CacheGeometry {
    CacheGeometry::new(set_bits, block_bits, associativity).expect("test geometry is valid")
}

/// Owns a simulator and replays trace text through it.
pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    pub fn new(set_bits: u32, block_bits: u32, associativity: usize) -> Self {
        Self {
            sim: Simulator::new(geometry(set_bits, block_bits, associativity)),
        }
    }

    /// Replays `trace` (lackey format, one event per line) and returns the
    /// outcomes of every event in order.
    pub fn run_trace(&mut self, trace: &str) -> Vec<EventOutcomes> {
        TraceReader::new(trace.as_bytes())
            .map(|event| {
                let event = event.expect("in-memory trace cannot fail to read");
                self.sim.process(&event)
            })
            .collect()
    }

    pub fn stats(&self) -> SimStats {
        *self.sim.stats()
    }
}

/// Replays `trace` on a fresh cache and returns the final counters.
pub fn replay(set_bits: u32, block_bits: u32, associativity: usize, trace: &str) -> SimStats {
    let mut ctx = TestContext::new(set_bits, block_bits, associativity);
    let _ = ctx.run_trace(trace);
    ctx.sim.finish()
}
