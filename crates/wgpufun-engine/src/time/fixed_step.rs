use std::time::{Duration, Instant};

/// Paces a loop at a fixed period without accumulating drift.
///
/// Each `wait` sleeps until the next deadline. If the loop has fallen more
/// than one period behind, the schedule restarts from now instead of running
/// a burst of catch-up iterations.
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    next: Instant,
}

impl FixedStep {
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero());
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Blocks until the next tick.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if let Some(remaining) = self.advance(now) {
            std::thread::sleep(remaining);
        }
    }

    /// Moves the deadline forward and returns how long to sleep from `now`.
    fn advance(&mut self, now: Instant) -> Option<Duration> {
        let deadline = self.next;
        if now + self.period < deadline {
            // Clock went backwards relative to the schedule; restart.
            self.next = now + self.period;
            return Some(self.period);
        }

        if now > deadline + self.period {
            log::trace!("fixed step fell behind by {:?}; resynchronising", now - deadline);
            self.next = now + self.period;
            return None;
        }

        self.next = deadline + self.period;
        deadline.checked_duration_since(now)
    }
}
