//! Numeric helpers shared by the overlay logic.

/// Clamps `v` into `[lo, hi]`.
///
/// NaN maps to `lo` so downstream state never carries a NaN.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    v.max(lo).min(hi)
}

/// Clamps a percentage into `[0, 100]`.
#[inline]
pub fn clamp_percent(v: f64) -> f64 {
    clamp(v, 0.0, 100.0)
}

/// One step of exponential interpolation from `current` toward `target`.
///
/// Snaps to `target` once the gap is below `epsilon`. Otherwise moves by
/// `gap * rate`, with `rate` clamped to `[0, 1]` so the step never
/// overshoots.
#[inline]
pub fn approach(current: f64, target: f64, rate: f64, epsilon: f64) -> f64 {
    let gap = target - current;
    if gap.abs() < epsilon {
        return target;
    }
    current + gap * clamp(rate, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{approach, clamp, clamp_percent};

    #[test]
    fn clamp_handles_nan_and_bounds() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp_percent(140.0), 100.0);
        assert_eq!(clamp_percent(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn approach_snaps_inside_epsilon() {
        assert_eq!(approach(99.95, 100.0, 0.08, 0.1), 100.0);
        assert_eq!(approach(50.05, 50.0, 0.02, 0.1), 50.0);
    }

    #[test]
    fn approach_steps_by_fraction_of_gap() {
        let next = approach(0.0, 100.0, 0.08, 0.1);
        assert!((next - 8.0).abs() < 1e-12);
        let down = approach(50.0, 40.0, 0.02, 0.1);
        assert!((down - 49.8).abs() < 1e-12);
    }

    #[test]
    fn approach_never_overshoots_with_bad_rate() {
        assert_eq!(approach(0.0, 10.0, 3.0, 0.1), 10.0);
    }
}
