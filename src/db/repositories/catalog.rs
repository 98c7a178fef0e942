use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;

use crate::entities::{mods, prelude::*, warframes, weapon_primaries};
use crate::models::catalog::{CatalogFile, ImportSummary, ModRecord, WarframeRecord, WeaponPrimaryRecord};

/// Repository for the static mod/warframe/weapon catalog
pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Listing
    // ========================================================================

    pub async fn list_mods(&self) -> Result<Vec<mods::Model>> {
        Mods::find()
            .all(&self.conn)
            .await
            .context("Failed to list mods")
    }

    pub async fn list_warframes(&self) -> Result<Vec<warframes::Model>> {
        Warframes::find()
            .all(&self.conn)
            .await
            .context("Failed to list warframes")
    }

    pub async fn list_primary_weapons(&self) -> Result<Vec<weapon_primaries::Model>> {
        WeaponPrimaries::find()
            .all(&self.conn)
            .await
            .context("Failed to list primary weapons")
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Insert every record whose name is not already in its table.
    pub async fn import(&self, catalog: &CatalogFile) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for record in &catalog.mods {
            if self.insert_mod(record).await? {
                summary.mods += 1;
            }
        }
        for record in &catalog.warframes {
            if self.insert_warframe(record).await? {
                summary.warframes += 1;
            }
        }
        for record in &catalog.weapons_primary {
            if self.insert_primary_weapon(record).await? {
                summary.weapons_primary += 1;
            }
        }

        info!(
            "Catalog import: {} mods, {} warframes, {} primary weapons",
            summary.mods, summary.warframes, summary.weapons_primary
        );
        Ok(summary)
    }

    async fn insert_mod(&self, record: &ModRecord) -> Result<bool> {
        let exists = Mods::find()
            .filter(mods::Column::Name.eq(record.name.as_str()))
            .count(&self.conn)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        mods::ActiveModel {
            name: Set(record.name.clone()),
            polarity: Set(record.polarity.clone()),
            drain: Set(record.drain),
            rank: Set(record.rank),
            rarity: Set(record.rarity.clone()),
            mod_type: Set(record.mod_type.clone()),
            effect: Set(record.effect.clone()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert mod {}", record.name))?;

        Ok(true)
    }

    async fn insert_warframe(&self, record: &WarframeRecord) -> Result<bool> {
        let exists = Warframes::find()
            .filter(warframes::Column::Name.eq(record.name.as_str()))
            .count(&self.conn)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        warframes::ActiveModel {
            name: Set(record.name.clone()),
            health: Set(record.health),
            shield: Set(record.shield),
            armor: Set(record.armor),
            energy: Set(record.energy),
            starting_energy: Set(record.starting_energy),
            sprint_speed: Set(record.sprint_speed),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert warframe {}", record.name))?;

        Ok(true)
    }

    async fn insert_primary_weapon(&self, r: &WeaponPrimaryRecord) -> Result<bool> {
        let exists = WeaponPrimaries::find()
            .filter(weapon_primaries::Column::Name.eq(r.name.as_str()))
            .count(&self.conn)
            .await?
            > 0;
        if exists {
            return Ok(false);
        }

        weapon_primaries::ActiveModel {
            name: Set(r.name.clone()),
            weapon_type: Set(r.weapon_type.clone()),
            fire_rate: Set(r.fire_rate),
            impact: Set(r.impact),
            puncture: Set(r.puncture),
            slash: Set(r.slash),
            cold: Set(r.cold),
            electricity: Set(r.electricity),
            heat: Set(r.heat),
            toxin: Set(r.toxin),
            blast: Set(r.blast),
            corrosive: Set(r.corrosive),
            gas: Set(r.gas),
            magnetic: Set(r.magnetic),
            radiation: Set(r.radiation),
            viral: Set(r.viral),
            critical_chance: Set(r.critical_chance),
            critical_multi: Set(r.critical_multi),
            multishot: Set(r.multishot),
            punch_through: Set(r.punch_through),
            range: Set(r.range),
            status_chance: Set(r.status_chance),
            impact_aoe: Set(r.impact_aoe),
            puncture_aoe: Set(r.puncture_aoe),
            slash_aoe: Set(r.slash_aoe),
            cold_aoe: Set(r.cold_aoe),
            electricity_aoe: Set(r.electricity_aoe),
            heat_aoe: Set(r.heat_aoe),
            toxin_aoe: Set(r.toxin_aoe),
            blast_aoe: Set(r.blast_aoe),
            corrosive_aoe: Set(r.corrosive_aoe),
            gas_aoe: Set(r.gas_aoe),
            magnetic_aoe: Set(r.magnetic_aoe),
            radiation_aoe: Set(r.radiation_aoe),
            viral_aoe: Set(r.viral_aoe),
            dmg_falloff: Set(r.dmg_falloff),
            range_aoe: Set(r.range_aoe),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .with_context(|| format!("Failed to insert primary weapon {}", r.name))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn sample_catalog() -> CatalogFile {
        serde_json::from_value(serde_json::json!({
            "mods": [
                {"name": "Serration", "polarity": "Madurai", "drain": 4, "rank": 10,
                 "rarity": "Common", "type": "Rifle", "effect": "+165% Damage"},
                {"name": "Vitality", "polarity": "Vazarin", "drain": 2, "rank": 10,
                 "rarity": "Common", "type": "Warframe", "effect": "+440% Health"}
            ],
            "warframes": [
                {"name": "Excalibur", "health": 100, "shield": 100, "armor": 225,
                 "energy": 100, "starting_energy": 50, "sprint_speed": 1}
            ],
            "weapons_primary": [
                {"name": "Braton", "type": "Rifle", "fire_rate": 9, "impact": 8,
                 "puncture": 8, "slash": 8, "critical_chance": 0.12, "critical_multi": 1.6,
                 "multishot": 1.0, "punch_through": 0.0, "range": 300.0, "status_chance": 0.06}
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_import_is_idempotent() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let repo = CatalogRepository::new(store.conn.clone());
        let catalog = sample_catalog();

        let first = repo.import(&catalog).await.unwrap();
        assert_eq!(
            first,
            ImportSummary {
                mods: 2,
                warframes: 1,
                weapons_primary: 1
            }
        );

        let second = repo.import(&catalog).await.unwrap();
        assert_eq!(second, ImportSummary::default());

        let mods = repo.list_mods().await.unwrap();
        assert_eq!(mods.len(), 2);
        assert!(mods.iter().any(|m| m.name == "Serration" && m.mod_type == "Rifle"));
        assert_eq!(repo.list_warframes().await.unwrap().len(), 1);

        let weapons = repo.list_primary_weapons().await.unwrap();
        assert_eq!(weapons[0].impact, Some(8));
        assert_eq!(weapons[0].viral, None);
    }
}
