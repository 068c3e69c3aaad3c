use super::mode::{Mode, ModeDurations};
use crate::ticker::TickSchedule;
use std::time::Instant;

/// Upper bound of the scrub control, in minutes
pub const MAX_SCRUB_MINUTES: u32 = 60;

/// Events raised by the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A running countdown passed zero. Raised once per run.
    Expired,
}

/// Countdown state for the active mode
#[derive(Debug, Clone)]
pub struct TimerEngine {
    mode: Mode,
    remaining_minutes: u32,
    remaining_seconds: u32,
    /// Duration the countdown was last reset to (drives the progress gauge)
    initial_minutes: u32,
    /// Present if and only if the countdown is running
    schedule: Option<TickSchedule>,
}

impl TimerEngine {
    pub fn new(mode: Mode, durations: &ModeDurations) -> Self {
        let minutes = durations.get(mode);
        Self {
            mode,
            remaining_minutes: minutes,
            remaining_seconds: 0,
            initial_minutes: minutes,
            schedule: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_minutes(&self) -> u32 {
        self.remaining_minutes
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn initial_minutes(&self) -> u32 {
        self.initial_minutes
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_some()
    }

    /// Switch mode and load its configured duration. Always stops.
    pub fn set_mode(&mut self, mode: Mode, durations: &ModeDurations) {
        self.mode = mode;
        self.load(durations.get(mode));
        tracing::debug!(mode = mode.name(), minutes = self.remaining_minutes, "mode set");
    }

    /// Restore the active mode's configured duration and stop
    pub fn reset(&mut self, durations: &ModeDurations) {
        self.load(durations.get(self.mode));
        tracing::debug!(minutes = self.remaining_minutes, "timer reset");
    }

    fn load(&mut self, minutes: u32) {
        self.remaining_minutes = minutes;
        self.remaining_seconds = 0;
        self.initial_minutes = minutes;
        self.schedule = None;
    }

    /// Begin counting down from now. No-op if already running.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if self.schedule.is_none() {
            self.schedule = Some(TickSchedule::starting_at(now));
            tracing::debug!(remaining = %self.display(), "timer started");
        }
    }

    /// Stop counting down. No-op if already paused.
    pub fn pause(&mut self) {
        if self.schedule.take().is_some() {
            tracing::debug!(remaining = %self.display(), "timer paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop without touching the remaining time
    pub fn stop(&mut self) {
        self.pause();
    }

    /// Scrub the current countdown. Leaves the configured duration alone.
    pub fn set_remaining_minutes(&mut self, minutes: u32) {
        self.remaining_minutes = minutes.min(MAX_SCRUB_MINUTES);
        self.remaining_seconds = 0;
        self.schedule = None;
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.is_running() {
            return None;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            None
        } else if self.remaining_minutes > 0 {
            self.remaining_minutes -= 1;
            self.remaining_seconds = 59;
            None
        } else {
            self.schedule = None;
            tracing::info!(mode = self.mode.name(), "countdown expired");
            Some(TimerEvent::Expired)
        }
    }

    /// Run every tick that has come due by `now`
    pub fn poll(&mut self, now: Instant) -> Option<TimerEvent> {
        loop {
            let due = match self.schedule.as_mut() {
                Some(schedule) => schedule.take_due(now),
                None => return None,
            };
            if !due {
                return None;
            }
            if let Some(event) = self.tick() {
                return Some(event);
            }
        }
    }

    /// Remaining time as zero-padded MM:SS
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_minutes, self.remaining_seconds)
    }

    fn remaining_total_seconds(&self) -> u64 {
        u64::from(self.remaining_minutes) * 60 + u64::from(self.remaining_seconds)
    }

    /// Fraction of the last reset duration already elapsed (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        let initial = u64::from(self.initial_minutes) * 60;
        if initial == 0 {
            return 0.0;
        }
        let remaining = self.remaining_total_seconds().min(initial);
        (initial - remaining) as f64 / initial as f64
    }

    /// Wall clock time at which a running countdown will reach zero
    pub fn projected_finish(
        &self,
        now: chrono::DateTime<chrono::Local>,
    ) -> Option<chrono::DateTime<chrono::Local>> {
        self.schedule.as_ref()?;
        let remaining = i64::try_from(self.remaining_total_seconds()).ok()?;
        Some(now + chrono::Duration::seconds(remaining))
    }

    /// Next instant the countdown needs attention, if running
    pub fn next_tick_due(&self) -> Option<Instant> {
        self.schedule.as_ref().map(TickSchedule::next_due)
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Mode::Focus, &ModeDurations::default())
    }
}
