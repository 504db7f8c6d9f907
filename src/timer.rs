//! Rest timer - countdown between sets

use std::time::{Duration, Instant};

/// Countdown anchored to the instant it was started.
#[derive(Debug, Clone, Copy)]
pub struct RestTimer {
    started: Instant,
    duration: Duration,
}

impl RestTimer {
    /// Start a countdown of `duration` from now.
    pub fn start(duration: Duration) -> Self {
        Self::start_at(Instant::now(), duration)
    }

    fn start_at(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    fn remaining_at(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed_at(now))
    }

    /// Time left, zero once the countdown has run out.
    pub fn remaining(&self) -> Duration {
        self.remaining_at(Instant::now())
    }

    pub fn is_done(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Elapsed fraction, clamped to 0.0..=1.0 so it can feed a gauge
    /// directly. A zero-length countdown reads as finished.
    pub fn progress(&self) -> f64 {
        self.progress_at(Instant::now())
    }

    fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let ratio = self.elapsed_at(now).as_secs_f64() / self.duration.as_secs_f64();
        ratio.clamp(0.0, 1.0)
    }
}

/// Render a duration as "M:SS" for countdown display.
pub fn format_mm_ss(d: Duration) -> String {
    let total = d.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
