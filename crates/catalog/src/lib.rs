use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_CATALOG_JSON: &str = include_str!("../assets/default_catalog.json");

/// Simulated statistics shown in the overlay's attributes panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipStats {
    pub name: String,
    pub class: String,
    pub manufacturer: String,
    pub shield: u32,
    pub armor: u32,
    pub structure: u32,
    pub capacitor: u32,
    /// Kept as text; some hulls quote fitting values with suffixes.
    pub cpu: String,
    pub power_grid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipEntry {
    /// Model URL handed to the page's loader.
    pub model: String,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub stats: ShipStats,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Which ship and faction the page was asked to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipParams {
    pub ship_id: String,
    pub faction_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipCatalog {
    pub default_ship: String,
    pub default_faction: String,
    pub ships: BTreeMap<String, ShipEntry>,
    #[serde(default)]
    pub factions: BTreeMap<String, Faction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound(String),
    Corrupt(String),
    Invalid(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(id) => write!(f, "catalog entry not found: {id}"),
            CatalogError::Corrupt(msg) => write!(f, "catalog is not valid JSON: {msg}"),
            CatalogError::Invalid(msg) => write!(f, "invalid catalog: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// A ship lookup after fallbacks were applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShip<'a> {
    pub ship_id: &'a str,
    pub ship: &'a ShipEntry,
    pub faction_id: &'a str,
    pub faction: &'a Faction,
    /// True when either requested id was unknown.
    pub fell_back: bool,
}

impl ShipCatalog {
    /// The catalog compiled into the viewer.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(DEFAULT_CATALOG_JSON)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: ShipCatalog =
            serde_json::from_str(raw).map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(self).map_err(|e| CatalogError::Corrupt(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.ships.contains_key(&self.default_ship) {
            return Err(CatalogError::Invalid(format!(
                "default ship {:?} is not in the catalog",
                self.default_ship
            )));
        }
        if !self.factions.contains_key(&self.default_faction) {
            return Err(CatalogError::Invalid(format!(
                "default faction {:?} is not in the catalog",
                self.default_faction
            )));
        }
        for (id, entry) in &self.ships {
            if entry.model.trim().is_empty() {
                return Err(CatalogError::Invalid(format!("ship {id:?} has no model")));
            }
            if !(entry.scale.is_finite() && entry.scale > 0.0) {
                return Err(CatalogError::Invalid(format!(
                    "ship {id:?} has non-positive scale {}",
                    entry.scale
                )));
            }
        }
        Ok(())
    }

    pub fn default_params(&self) -> ShipParams {
        ShipParams {
            ship_id: self.default_ship.clone(),
            faction_id: self.default_faction.clone(),
        }
    }

    pub fn ship(&self, id: &str) -> Result<&ShipEntry, CatalogError> {
        self.ships
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn faction(&self, id: &str) -> Result<&Faction, CatalogError> {
        self.factions
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Looks up the requested ship and faction, falling back to the
    /// defaults for unknown ids.
    pub fn resolve<'a>(&'a self, params: &'a ShipParams) -> Result<ResolvedShip<'a>, CatalogError> {
        let (ship_id, ship, ship_fallback) = match self.ships.get(&params.ship_id) {
            Some(ship) => (params.ship_id.as_str(), ship, false),
            None => (
                self.default_ship.as_str(),
                self.ship(&self.default_ship)?,
                true,
            ),
        };
        let (faction_id, faction, faction_fallback) = match self.factions.get(&params.faction_id) {
            Some(faction) => (params.faction_id.as_str(), faction, false),
            None => (
                self.default_faction.as_str(),
                self.faction(&self.default_faction)?,
                true,
            ),
        };
        Ok(ResolvedShip {
            ship_id,
            ship,
            faction_id,
            faction,
            fell_back: ship_fallback || faction_fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, ShipCatalog, ShipParams};
    use pretty_assertions::assert_eq;

    fn params(ship: &str, faction: &str) -> ShipParams {
        ShipParams {
            ship_id: ship.to_string(),
            faction_id: faction.to_string(),
        }
    }

    #[test]
    fn builtin_catalog_validates() {
        let catalog = ShipCatalog::builtin().unwrap();
        assert_eq!(catalog.default_params(), params("imperial", "amarr"));
        assert_eq!(catalog.ship("raven").unwrap().scale, 0.6);
        assert_eq!(catalog.ship("imperial").unwrap().scale, 1.0);
    }

    #[test]
    fn resolve_known_ids() {
        let catalog = ShipCatalog::builtin().unwrap();
        let p = params("rifter", "minmatar");
        let r = catalog.resolve(&p).unwrap();
        assert_eq!(r.ship_id, "rifter");
        assert_eq!(r.faction.name, "Minmatar Republic");
        assert!(!r.fell_back);
    }

    #[test]
    fn resolve_unknown_ids_falls_back_to_defaults() {
        let catalog = ShipCatalog::builtin().unwrap();
        let p = params("titan", "jove");
        let r = catalog.resolve(&p).unwrap();
        assert_eq!(r.ship_id, "imperial");
        assert_eq!(r.faction_id, "amarr");
        assert!(r.fell_back);
    }

    #[test]
    fn rejects_missing_default_ship() {
        let raw = r#"{
            "default_ship": "ghost",
            "default_faction": "amarr",
            "ships": {},
            "factions": { "amarr": { "name": "Amarr Empire" } }
        }"#;
        let err = ShipCatalog::from_json_str(raw).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ShipCatalog::from_json_str("[1, 2").unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt(_)));
    }

    #[test]
    fn json_round_trip_preserves_catalog() {
        let catalog = ShipCatalog::builtin().unwrap();
        let again = ShipCatalog::from_json_str(&catalog.to_json_pretty().unwrap()).unwrap();
        assert_eq!(again, catalog);
    }

    #[test]
    fn lookup_errors_name_the_id() {
        let catalog = ShipCatalog::builtin().unwrap();
        assert_eq!(
            catalog.ship("nope").unwrap_err(),
            CatalogError::NotFound("nope".to_string())
        );
    }
}
