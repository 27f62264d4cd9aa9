//! # Unit Components
//!
//! Groups the simulator tests by component: the cache model, trace replay,
//! configuration, statistics, and randomized property checks.




/// Trace replay tests: event dispatch, repeat detection and trace parsing.
pub mod sim;

/// Statistics formatting and derived metric tests.
pub mod stats;
