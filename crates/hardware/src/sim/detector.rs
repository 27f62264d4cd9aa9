//! Repeated-access detection.

/// Remembers the last address fed to the simulator across the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatDetector {
    last_address: Option<u64>,
}

impl RepeatDetector {
    /// Creates a detector that has not seen any address yet.
    pub const fn new() -> Self {
        Self { last_address: None }
    }

    /// Records `addr` and reports whether it repeats the previous address.
    ///
    /// A match is only reported when `suppress` is false. The remembered
    /// address is updated either way.
    pub fn observe(&mut self, addr: u64, suppress: bool) -> bool {
        let repeated = !suppress && self.last_address == Some(addr);
        self.last_address = Some(addr);
        repeated
    }

    /// The most recently observed address, if any.
    pub const fn last_address(&self) -> Option<u64> {
        self.last_address
    }
}
