//! Trace replay.
//!
//! Provides the trace reader, the repeated-access detector and the simulator
//! driver that feeds decoded events through the cache model.

/// Repeated-access detection.
pub mod detector;
/// Trace replay driver.
pub mod simulator;
/// Trace file parsing.
pub mod trace;

pub use detector::RepeatDetector;
pub use simulator::{EventOutcomes, Simulator};
pub use trace::{TraceReader, parse_line};
