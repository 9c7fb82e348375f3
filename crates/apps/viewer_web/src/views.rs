//! JSON payloads handed to the page.

use catalog::{CatalogError, ShipCatalog, ShipParams, ShipStats};
use overlay::{FittingItem, StatGroup, StatsTab, fitting_items, stat_groups};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShipView<'a> {
    pub ship_id: &'a str,
    pub faction_id: &'a str,
    pub faction_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<&'a str>,
    pub model: &'a str,
    pub scale: f64,
    pub stats: &'a ShipStats,
    pub fell_back: bool,
}

pub fn ship_view<'a>(
    catalog: &'a ShipCatalog,
    params: &'a ShipParams,
) -> Result<ShipView<'a>, CatalogError> {
    let r = catalog.resolve(params)?;
    Ok(ShipView {
        ship_id: r.ship_id,
        faction_id: r.faction_id,
        faction_name: &r.faction.name,
        accent: r.faction.accent.as_deref(),
        model: &r.ship.model,
        scale: r.ship.scale,
        stats: &r.ship.stats,
        fell_back: r.fell_back,
    })
}

#[derive(Debug, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum StatsPanel {
    Attributes {
        groups: Vec<StatGroup>,
        footer: [&'static str; 2],
    },
    Fitting {
        items: Vec<FittingItem>,
        footer: [&'static str; 2],
    },
}

pub fn stats_panel(tab: StatsTab, stats: &ShipStats) -> StatsPanel {
    let footer = [overlay::FOOTER_MODE, overlay::FOOTER_ID];
    match tab {
        StatsTab::Attributes => StatsPanel::Attributes {
            groups: stat_groups(stats),
            footer,
        },
        StatsTab::Fitting => StatsPanel::Fitting {
            items: fitting_items(),
            footer,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{ship_view, stats_panel};
    use catalog::{ShipCatalog, ShipParams};
    use overlay::StatsTab;
    use pretty_assertions::assert_eq;

    #[test]
    fn ship_view_serializes_resolved_ship() {
        let catalog = ShipCatalog::builtin().unwrap();
        let params = ShipParams {
            ship_id: "raven".into(),
            faction_id: "caldari".into(),
        };
        let json = serde_json::to_value(ship_view(&catalog, &params).unwrap()).unwrap();
        assert_eq!(json["model"], "/models/raven.glb");
        assert_eq!(json["faction_name"], "Caldari State");
        assert_eq!(json["stats"]["class"], "Battleship");
        assert_eq!(json["fell_back"], false);
    }

    #[test]
    fn stats_panel_is_tagged_by_tab() {
        let catalog = ShipCatalog::builtin().unwrap();
        let stats = &catalog.ship("imperial").unwrap().stats;

        let attrs = serde_json::to_value(stats_panel(StatsTab::Attributes, stats)).unwrap();
        assert_eq!(attrs["tab"], "attributes");
        assert_eq!(attrs["groups"][0]["rows"][1]["value"], "2,840");

        let fitting = serde_json::to_value(stats_panel(StatsTab::Fitting, stats)).unwrap();
        assert_eq!(fitting["tab"], "fitting");
        assert_eq!(fitting["items"][3]["kind"], "propulsion");
        assert_eq!(fitting["footer"][1], "ID: 99-AK-2");
    }
}
