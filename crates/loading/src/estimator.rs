use foundation::numeric::approach;
use foundation::time::Millis;
use serde::Serialize;

use crate::config::EstimatorConfig;
use crate::source::RawProgress;

/// Per-session estimator state.
///
/// Owned by exactly one loading session; a new session starts from
/// `EstimatorState::default()`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct EstimatorState {
    /// Smoothed, user-facing percentage.
    pub display_progress: f64,
    /// Raw value seen on the previous poll.
    pub last_real_progress: f64,
    /// Highest raw value seen this session.
    pub peak_real_progress: f64,
    /// How long raw progress has been unchanged.
    pub stuck_duration: Millis,
    /// Synthetic progress currently added on top of raw progress.
    pub fake_bonus: f64,
}

/// Where the display should head for a given raw value and stall length.
///
/// Returns `(target, fake_bonus)`.
pub fn stall_target(raw: RawProgress, stuck: Millis, cfg: &EstimatorConfig) -> (f64, f64) {
    let raw = raw.value();
    if stuck <= cfg.stall_threshold() || raw >= cfg.ceiling {
        return (raw, 0.0);
    }
    let stalled_ms = stuck.saturating_sub(cfg.stall_threshold()).as_f64();
    let bonus = (stalled_ms * cfg.fake_rate_per_ms).min(cfg.fake_cap.min(cfg.ceiling - raw));
    ((raw + bonus).min(cfg.ceiling), bonus)
}

impl EstimatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_stalled(&self) -> bool {
        self.fake_bonus > 0.0
    }

    /// Runs one poll and returns the new display value.
    ///
    /// The display only moves down when the loader itself reported a value
    /// below one it reported earlier. When a stall ends and the fake bonus is
    /// withdrawn, the display holds until raw progress catches up.
    pub fn tick(&mut self, raw: RawProgress, cfg: &EstimatorConfig) -> f64 {
        let value = raw.value();
        if value == self.last_real_progress {
            self.stuck_duration += cfg.poll_interval();
        } else {
            self.stuck_duration = Millis::ZERO;
            self.last_real_progress = value;
        }
        self.peak_real_progress = self.peak_real_progress.max(value);

        let (target, bonus) = stall_target(raw, self.stuck_duration, cfg);
        self.fake_bonus = bonus;

        let current = self.display_progress;
        self.display_progress = if target >= current {
            approach(current, target, cfg.ascend_speed, cfg.snap_epsilon)
        } else if value < self.peak_real_progress {
            approach(current, target, cfg.descend_speed, cfg.snap_epsilon)
        } else {
            current
        };
        self.display_progress
    }
}
