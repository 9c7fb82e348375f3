use foundation::time::Millis;
use serde::Serialize;

use crate::estimator::EstimatorState;

/// Counters for one loading session, logged when it finishes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct SessionMetrics {
    pub ticks: u64,
    pub stalled_ticks: u64,
    /// Distinct stalls: polls where the fake bonus engaged from zero.
    pub stalls: u64,
    pub peak_fake_bonus: f64,
    pub polled: Millis,
    #[serde(skip)]
    last_stalled: bool,
}

impl SessionMetrics {
    pub fn record_tick(&mut self, state: &EstimatorState, interval: Millis) {
        self.ticks += 1;
        self.polled += interval;
        let stalled = state.is_stalled();
        if stalled {
            self.stalled_ticks += 1;
            if !self.last_stalled {
                self.stalls += 1;
            }
            self.peak_fake_bonus = self.peak_fake_bonus.max(state.fake_bonus);
        }
        self.last_stalled = stalled;
    }

    /// Share of polls spent in a stall, in `[0, 1]`.
    pub fn stalled_ratio(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.stalled_ticks as f64 / self.ticks as f64
        }
    }
}
