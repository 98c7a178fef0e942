//! Catalog seed file format.
//!
//! The catalog is read-only over HTTP; rows are loaded from a JSON file with
//! `arsenal import-catalog`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub mods: Vec<ModRecord>,

    #[serde(default)]
    pub warframes: Vec<WarframeRecord>,

    #[serde(default)]
    pub weapons_primary: Vec<WeaponPrimaryRecord>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModRecord {
    pub name: String,
    pub polarity: String,
    pub drain: i32,
    pub rank: i32,
    pub rarity: String,
    #[serde(rename = "type")]
    pub mod_type: String,
    pub effect: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarframeRecord {
    pub name: String,
    pub health: i32,
    pub shield: Option<i32>,
    pub armor: i32,
    pub energy: Option<i32>,
    pub starting_energy: Option<i32>,
    pub sprint_speed: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponPrimaryRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    pub fire_rate: i32,

    pub impact: Option<i32>,
    pub puncture: Option<i32>,
    pub slash: Option<i32>,
    pub cold: Option<i32>,
    pub electricity: Option<i32>,
    pub heat: Option<i32>,
    pub toxin: Option<i32>,
    pub blast: Option<i32>,
    pub corrosive: Option<i32>,
    pub gas: Option<i32>,
    pub magnetic: Option<i32>,
    pub radiation: Option<i32>,
    pub viral: Option<i32>,

    pub critical_chance: f64,
    pub critical_multi: f64,
    pub multishot: f64,
    pub punch_through: f64,
    pub range: f64,
    pub status_chance: f64,

    pub impact_aoe: Option<i32>,
    pub puncture_aoe: Option<i32>,
    pub slash_aoe: Option<i32>,
    pub cold_aoe: Option<i32>,
    pub electricity_aoe: Option<i32>,
    pub heat_aoe: Option<i32>,
    pub toxin_aoe: Option<i32>,
    pub blast_aoe: Option<i32>,
    pub corrosive_aoe: Option<i32>,
    pub gas_aoe: Option<i32>,
    pub magnetic_aoe: Option<i32>,
    pub radiation_aoe: Option<i32>,
    pub viral_aoe: Option<i32>,

    pub dmg_falloff: Option<f64>,
    pub range_aoe: Option<f64>,
}

/// Rows inserted by one catalog import. Records whose name already exists
/// are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub mods: usize,
    pub warframes: usize,
    pub weapons_primary: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_catalog() {
        let json = r#"{
            "mods": [{
                "name": "Serration",
                "polarity": "Madurai",
                "drain": 4,
                "rank": 10,
                "rarity": "Common",
                "type": "Rifle",
                "effect": "+165% Damage"
            }],
            "weapons_primary": [{
                "name": "Braton",
                "type": "Rifle",
                "fire_rate": 9,
                "impact": 8,
                "critical_chance": 0.12,
                "critical_multi": 1.6,
                "multishot": 1.0,
                "punch_through": 0.0,
                "range": 300.0,
                "status_chance": 0.06
            }]
        }"#;

        let catalog: CatalogFile = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.mods.len(), 1);
        assert_eq!(catalog.mods[0].mod_type, "Rifle");
        assert!(catalog.warframes.is_empty());
        assert_eq!(catalog.weapons_primary[0].impact, Some(8));
        assert_eq!(catalog.weapons_primary[0].slash, None);
        assert_eq!(catalog.weapons_primary[0].dmg_falloff, None);
    }

    #[test]
    fn test_mod_record_requires_type() {
        let json = r#"{"name": "Vitality", "polarity": "Vazarin", "drain": 2,
            "rank": 10, "rarity": "Common", "effect": "+440% Health"}"#;
        assert!(serde_json::from_str::<ModRecord>(json).is_err());
    }
}
