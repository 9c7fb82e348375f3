use catalog::ShipStats;
use serde::Serialize;

/// One labelled value in the attributes tab, optionally with a fill bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    /// Bar fill in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar: Option<u8>,
    /// Palette key for the bar colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<&'static str>,
}

impl StatRow {
    fn plain(label: &'static str, value: impl Into<String>, unit: &'static str) -> Self {
        Self {
            label,
            value: value.into(),
            unit,
            bar: None,
            tone: None,
        }
    }

    fn with_bar(mut self, bar: u8, tone: &'static str) -> Self {
        self.bar = Some(bar.min(100));
        self.tone = Some(tone);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatGroup {
    pub title: &'static str,
    pub rows: Vec<StatRow>,
}

/// Capacitor recharge time shown for every hull in simulation mode (s).
pub const SIMULATED_RECHARGE_S: u32 = 455;

pub const FOOTER_MODE: &str = "SIMULATION MODE";
pub const FOOTER_ID: &str = "ID: 99-AK-2";

/// Groups a ship's stats the way the attributes tab lays them out.
///
/// Bar fills are simulated load levels, not derived from the stats.
pub fn stat_groups(stats: &ShipStats) -> Vec<StatGroup> {
    vec![
        StatGroup {
            title: "Defense",
            rows: vec![
                StatRow::plain("Shield HP", format_thousands(stats.shield), "HP")
                    .with_bar(70, "shield"),
                StatRow::plain("Armor HP", format_thousands(stats.armor), "HP")
                    .with_bar(45, "armor"),
                StatRow::plain("Structure", format_thousands(stats.structure), "HP")
                    .with_bar(30, "structure"),
            ],
        },
        StatGroup {
            title: "Capacitor",
            rows: vec![
                StatRow::plain("Capacity", format_thousands(stats.capacitor), "GJ")
                    .with_bar(85, "capacitor"),
                StatRow::plain("Recharge", SIMULATED_RECHARGE_S.to_string(), "s"),
            ],
        },
        StatGroup {
            title: "Fitting",
            rows: vec![
                StatRow::plain("CPU", stats.cpu.clone(), "tf").with_bar(92, "cpu"),
                StatRow::plain("Powergrid", stats.power_grid.clone(), "MW")
                    .with_bar(64, "power"),
            ],
        },
    ]
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Weapon,
    Propulsion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FittingItem {
    pub name: &'static str,
    pub kind: ModuleKind,
    pub status: &'static str,
}

/// The simulated fit listed in the fitting tab.
pub fn fitting_items() -> Vec<FittingItem> {
    [
        ("200mm AutoCannon II", ModuleKind::Weapon),
        ("200mm AutoCannon II", ModuleKind::Weapon),
        ("Rocket Launcher II", ModuleKind::Weapon),
        ("1MN Afterburner II", ModuleKind::Propulsion),
    ]
    .into_iter()
    .map(|(name, kind)| FittingItem {
        name,
        kind,
        status: "ONLINE",
    })
    .collect()
}

/// Formats an integer with comma thousands separators (`12,500`).
pub fn format_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
