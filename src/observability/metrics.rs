use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters updated by a replay producer while it streams
#[derive(Debug, Default)]
pub struct PlaybackMetrics {
    ticks: AtomicU64,
    frames_pushed: AtomicU64,
    frames_skipped: AtomicU64,
    loops_completed: AtomicU64,
    total_lateness_us: AtomicU64,
}

impl PlaybackMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn frames_pushed(&self) -> u64 {
        self.frames_pushed.load(Ordering::Relaxed)
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped.load(Ordering::Relaxed)
    }

    pub fn loops_completed(&self) -> u64 {
        self.loops_completed.load(Ordering::Relaxed)
    }

    /// Record one sleep; `lateness` is how far it overshot the interval
    pub fn record_tick(&self, lateness: Duration) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.total_lateness_us
            .fetch_add(lateness.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_pushed(&self) {
        self.frames_pushed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.frames_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_loop(&self) {
        self.loops_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Mean sleep overshoot per tick
    pub fn avg_tick_lateness_us(&self) -> u64 {
        let ticks = self.ticks();
        if ticks == 0 {
            return 0;
        }
        self.total_lateness_us.load(Ordering::Relaxed) / ticks
    }
}
