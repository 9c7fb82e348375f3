use foundation::time::Millis;

/// Catch-up limit per `advance` call.
///
/// A backgrounded tab can hand us a multi-second frame delta; replaying
/// every missed tick would fast-forward the animation in one frame.
pub const DEFAULT_MAX_CATCH_UP: u32 = 20;

/// Fixed-interval timer driven by variable frame deltas.
///
/// This is the overlay's `setInterval`: callers feed elapsed wall time and
/// get back how many whole periods have elapsed. Leftover time carries into
/// the next call so ticks never drift.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    period: Millis,
    max_catch_up: u32,
    accumulated_ms: f64,
    running: bool,
}

impl IntervalTimer {
    pub fn new(period: Millis) -> Self {
        Self {
            period,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
            accumulated_ms: 0.0,
            running: false,
        }
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    pub fn period(&self) -> Millis {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Arms the timer. Restarting discards any partially elapsed period.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulated_ms = 0.0;
    }

    /// Disarms the timer (`clearInterval`).
    pub fn clear(&mut self) {
        self.running = false;
        self.accumulated_ms = 0.0;
    }

    /// Feeds `elapsed_ms` of wall time and returns the number of ticks due.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !self.running || self.period == Millis::ZERO {
            return 0;
        }
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulated_ms += elapsed_ms;
        }

        let period = self.period.as_f64();
        let mut due = 0u32;
        while self.accumulated_ms >= period && due < self.max_catch_up {
            self.accumulated_ms -= period;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulated_ms >= period {
            // Drop the backlog rather than replaying it next frame.
            self.accumulated_ms %= period;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::IntervalTimer;
    use foundation::time::Millis;

    #[test]
    fn idle_timer_never_ticks() {
        let mut t = IntervalTimer::new(Millis(50));
        assert_eq!(t.advance(1_000.0), 0);
    }

    #[test]
    fn ticks_once_per_whole_period() {
        let mut t = IntervalTimer::new(Millis(50));
        t.start();
        assert_eq!(t.advance(16.0), 0);
        assert_eq!(t.advance(16.0), 0);
        assert_eq!(t.advance(20.0), 1);
        assert_eq!(t.advance(100.0), 2);
    }

    #[test]
    fn catch_up_is_bounded_and_backlog_dropped() {
        let mut t = IntervalTimer::new(Millis(50)).with_max_catch_up(4);
        t.start();
        assert_eq!(t.advance(10_000.0), 4);
        assert_eq!(t.advance(0.0), 0);
    }

    #[test]
    fn clear_discards_partial_period() {
        let mut t = IntervalTimer::new(Millis(50));
        t.start();
        assert_eq!(t.advance(40.0), 0);
        t.clear();
        t.start();
        assert_eq!(t.advance(40.0), 0);
        assert!(t.is_running());
    }
}
