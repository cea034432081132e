//! Fixed-interval tasks driven by the host tick.

/// Fires once every `interval` ticks, starting on tick `interval`.
///
/// The host calls [`tick`](Self::tick) exactly once per engine tick, so two
/// firings can never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringTask {
    interval: u64,
    remaining: u64,
}

impl RecurringTask {
    /// Create a task firing every `interval` ticks. An interval of 0 is
    /// treated as 1.
    #[must_use]
    pub const fn every(interval: u64) -> Self {
        let interval = if interval == 0 { 1 } else { interval };
        Self {
            interval,
            remaining: interval,
        }
    }

    /// Advance one tick. Returns `true` when the task is due.
    pub const fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn interval(&self) -> u64 {
        self.interval
    }
}
