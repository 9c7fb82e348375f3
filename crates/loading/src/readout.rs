use foundation::numeric::clamp_percent;
use serde::Serialize;

/// Circumference of the progress ring (`r = 45` in a 100x100 viewBox).
pub const RING_CIRCUMFERENCE: f64 = 283.0;

/// Numeric pieces of the loading overlay: the centred percentage and the
/// stroke offset of the progress ring.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProgressReadout {
    pub percent: u8,
    pub ring_dash_offset: f64,
}

impl ProgressReadout {
    pub fn from_display(display: f64) -> Self {
        let p = clamp_percent(display);
        Self {
            percent: p.round() as u8,
            ring_dash_offset: RING_CIRCUMFERENCE - (p / 100.0) * RING_CIRCUMFERENCE,
        }
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProgressReadout, RING_CIRCUMFERENCE};

    #[test]
    fn rounds_half_up_and_fills_ring() {
        let r = ProgressReadout::from_display(42.5);
        assert_eq!(r.percent, 43);
        assert_eq!(r.label(), "43%");
        assert_eq!(ProgressReadout::from_display(0.0).ring_dash_offset, RING_CIRCUMFERENCE);
        assert_eq!(ProgressReadout::from_display(100.0).ring_dash_offset, 0.0);
    }

    #[test]
    fn out_of_range_display_is_clamped() {
        assert_eq!(ProgressReadout::from_display(130.0).percent, 100);
        assert_eq!(ProgressReadout::from_display(f64::NAN).percent, 0);
    }
}
