use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ViewMode {
    #[default]
    Standard,
    Tactical,
    Wireframe,
}

impl ViewMode {
    /// Button order in the view-control panel.
    pub const ALL: [ViewMode; 3] = [ViewMode::Standard, ViewMode::Tactical, ViewMode::Wireframe];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Standard => "STANDARD",
            ViewMode::Tactical => "TACTICAL",
            ViewMode::Wireframe => "WIREFRAME",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(label))
    }

    /// Tactical mode draws the targeting reticle over the ship.
    pub fn shows_reticle(self) -> bool {
        self == ViewMode::Tactical
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
pub enum StatsTab {
    #[default]
    Attributes,
    Fitting,
}

impl StatsTab {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "attributes" => Some(StatsTab::Attributes),
            "fitting" => Some(StatsTab::Fitting),
            _ => None,
        }
    }
}

/// State behind the view-control panel and the stats tabs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ViewControls {
    pub mode: ViewMode,
    pub rotating: bool,
    pub tab: StatsTab,
}

impl Default for ViewControls {
    fn default() -> Self {
        Self {
            mode: ViewMode::Standard,
            rotating: true,
            tab: StatsTab::Attributes,
        }
    }
}

impl ViewControls {
    /// Returns true when the mode actually changed.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn toggle_rotation(&mut self) -> bool {
        self.rotating = !self.rotating;
        self.rotating
    }

    pub fn rotation_label(&self) -> &'static str {
        if self.rotating {
            "HALT ROTATION"
        } else {
            "INITIATE ROTATION"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StatsTab, ViewControls, ViewMode};

    #[test]
    fn labels_round_trip_case_insensitively() {
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::from_label(mode.label()), Some(mode));
        }
        assert_eq!(ViewMode::from_label("tactical"), Some(ViewMode::Tactical));
        assert_eq!(ViewMode::from_label("orbit"), None);
    }

    #[test]
    fn only_tactical_shows_reticle() {
        let with_reticle: Vec<_> = ViewMode::ALL
            .into_iter()
            .filter(|m| m.shows_reticle())
            .collect();
        assert_eq!(with_reticle, vec![ViewMode::Tactical]);
    }

    #[test]
    fn rotation_toggle_flips_label() {
        let mut controls = ViewControls::default();
        assert_eq!(controls.rotation_label(), "HALT ROTATION");
        assert!(!controls.toggle_rotation());
        assert_eq!(controls.rotation_label(), "INITIATE ROTATION");
    }

    #[test]
    fn set_mode_reports_changes() {
        let mut controls = ViewControls::default();
        assert!(!controls.set_mode(ViewMode::Standard));
        assert!(controls.set_mode(ViewMode::Wireframe));
        assert_eq!(StatsTab::from_name("Fitting"), Some(StatsTab::Fitting));
    }
}
