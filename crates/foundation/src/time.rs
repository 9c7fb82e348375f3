use core::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Time primitives
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// Advances by a (possibly fractional) number of milliseconds.
    ///
    /// Negative and non-finite deltas leave the time unchanged; engine time
    /// never runs backwards.
    pub fn after_ms(self, delta_ms: f64) -> Self {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return self;
        }
        Time(self.0 + delta_ms / 1000.0)
    }
}

/// Whole-millisecond duration, as used by poll timers and stall tracking.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    pub fn saturating_add(self, other: Millis) -> Millis {
        Millis(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Millis) -> Millis {
        Millis(self.0.saturating_sub(other.0))
    }
}

impl Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Millis {
    fn add_assign(&mut self, rhs: Millis) {
        *self = self.saturating_add(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::{Millis, Time};

    #[test]
    fn millis_saturate_instead_of_wrapping() {
        let mut m = Millis(u64::MAX - 1);
        m += Millis(10);
        assert_eq!(m, Millis(u64::MAX));
        assert_eq!(Millis(3).saturating_sub(Millis(5)), Millis::ZERO);
    }

    #[test]
    fn time_ignores_negative_and_nan_deltas() {
        let t = Time(1.0);
        assert_eq!(t.after_ms(-5.0), t);
        assert_eq!(t.after_ms(f64::NAN), t);
        assert_eq!(t.after_ms(500.0), Time(1.5));
    }
}
