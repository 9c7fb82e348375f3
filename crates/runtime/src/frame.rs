use foundation::time::Time;

/// Animation-frame metadata.
///
/// The page drives the overlay from `requestAnimationFrame`, so frame deltas
/// are whatever the browser reports. Everything downstream only sees the
/// index and the accumulated time, which keeps replays from a recorded
/// delta list deterministic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta since the previous frame (milliseconds).
    pub dt_ms: f64,
    /// Overlay time at the start of the frame.
    pub time: Time,
}

impl Frame {
    pub fn start() -> Self {
        Self {
            index: 0,
            dt_ms: 0.0,
            time: Time::ZERO,
        }
    }

    /// The frame that follows `self` after `dt_ms` milliseconds.
    ///
    /// Negative or non-finite deltas are recorded as zero.
    pub fn advance(self, dt_ms: f64) -> Self {
        let dt_ms = if dt_ms.is_finite() && dt_ms > 0.0 {
            dt_ms
        } else {
            0.0
        };
        Self {
            index: self.index.wrapping_add(1),
            dt_ms,
            time: self.time.after_ms(dt_ms),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::start()
    }
}
