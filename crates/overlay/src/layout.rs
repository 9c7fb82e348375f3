//! Responsive side-panel placement.
//!
//! On narrow viewports both side panels park off-screen and slide in while
//! hovered (or focused). Wider viewports always show them.

use serde::Serialize;

/// Viewports narrower than this are `Small`.
pub const SMALL_MAX_WIDTH: f64 = 900.0;
/// Viewports narrower than this (and not small) are `Medium`.
pub const MEDIUM_MAX_WIDTH: f64 = 1200.0;
/// Horizontal distance a parked panel is pushed off-screen.
pub const PANEL_HIDE_OFFSET_PX: f64 = 240.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    /// A NaN width is treated as large: nothing gets hidden on bad input.
    pub fn classify(width: f64) -> Self {
        if width < SMALL_MAX_WIDTH {
            Breakpoint::Small
        } else if width < MEDIUM_MAX_WIDTH {
            Breakpoint::Medium
        } else {
            Breakpoint::Large
        }
    }

    pub fn auto_hides_panels(self) -> bool {
        self == Breakpoint::Small
    }

    pub fn left_panel_width_px(self) -> u32 {
        match self {
            Breakpoint::Small => 224,
            Breakpoint::Medium | Breakpoint::Large => 288,
        }
    }

    pub fn right_panel_width_px(self) -> u32 {
        match self {
            Breakpoint::Small => 224,
            Breakpoint::Medium => 256,
            Breakpoint::Large => 320,
        }
    }

    /// Scroll height of the stats panel body.
    pub fn stats_max_height_px(self) -> u32 {
        match self {
            Breakpoint::Small => 180,
            Breakpoint::Medium | Breakpoint::Large => 300,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelSide {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => Some(PanelSide::Left),
            "right" => Some(PanelSide::Right),
            _ => None,
        }
    }
}

/// Horizontal translation of each panel, in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PanelOffsets {
    pub left: f64,
    pub right: f64,
}

pub fn panel_offsets(width: f64, left_hovered: bool, right_hovered: bool) -> PanelOffsets {
    if !Breakpoint::classify(width).auto_hides_panels() {
        return PanelOffsets {
            left: 0.0,
            right: 0.0,
        };
    }
    PanelOffsets {
        left: if left_hovered { 0.0 } else { -PANEL_HIDE_OFFSET_PX },
        right: if right_hovered { 0.0 } else { PANEL_HIDE_OFFSET_PX },
    }
}

/// Last measured viewport width plus the hover state of both panels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanelLayout {
    width: f64,
    left_hovered: bool,
    right_hovered: bool,
}

impl PanelLayout {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            left_hovered: false,
            right_hovered: false,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::classify(self.width)
    }

    /// Records a new viewport width; returns true when the breakpoint changed.
    pub fn resize(&mut self, width: f64) -> bool {
        let before = self.breakpoint();
        self.width = width;
        before != self.breakpoint()
    }

    pub fn set_hover(&mut self, side: PanelSide, hovered: bool) {
        match side {
            PanelSide::Left => self.left_hovered = hovered,
            PanelSide::Right => self.right_hovered = hovered,
        }
    }

    pub fn is_hovered(&self, side: PanelSide) -> bool {
        match side {
            PanelSide::Left => self.left_hovered,
            PanelSide::Right => self.right_hovered,
        }
    }

    pub fn offsets(&self) -> PanelOffsets {
        panel_offsets(self.width, self.left_hovered, self.right_hovered)
    }

    /// Whether the edge strip that invites hovering is drawn for `side`.
    pub fn shows_hover_trigger(&self, side: PanelSide) -> bool {
        self.breakpoint().auto_hides_panels() && !self.is_hovered(side)
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::new(MEDIUM_MAX_WIDTH)
    }
}
