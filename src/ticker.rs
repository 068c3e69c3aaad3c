use std::time::{Duration, Instant};

/// How long the event loop waits for input before checking the timer
pub const POLL_INTERVAL_MS: u64 = 250;

/// Length of one countdown step
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Get the event loop poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(POLL_INTERVAL_MS)
}

/// Recurring one-second schedule for a running countdown.
///
/// Owning one of these is what it means for the timer to be running;
/// dropping it cancels the schedule.
#[derive(Debug, Clone)]
pub struct TickSchedule {
    next_due: Instant,
}

impl TickSchedule {
    /// Schedule the first tick one period after `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            next_due: now + TICK_PERIOD,
        }
    }

    /// Instant of the next pending tick
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consume one tick if it has come due by `now`
    pub fn take_due(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due += TICK_PERIOD;
            true
        } else {
            false
        }
    }
}
