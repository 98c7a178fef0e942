use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{Mod, User, Warframe, WeaponPrimary};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Public view of a user. Never carries the password hash or the token.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub date_created: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            date_created: user.date_created,
        }
    }
}

/// Catalog mod as served by `GET /mod`.
///
/// Clients read the rarity under `type`, and `effect` is not exposed. The
/// stored mod type stays internal.
#[derive(Debug, Serialize)]
pub struct ModDto {
    pub id: i32,
    pub name: String,
    pub polarity: String,
    pub drain: i32,
    pub rank: i32,
    pub rarity: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Mod> for ModDto {
    fn from(model: Mod) -> Self {
        Self {
            id: model.id,
            name: model.name,
            polarity: model.polarity,
            drain: model.drain,
            rank: model.rank,
            kind: model.rarity.clone(),
            rarity: model.rarity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarframeDto {
    pub id: i32,
    pub name: String,
    pub health: i32,
    pub shield: Option<i32>,
    pub armor: i32,
    pub energy: Option<i32>,
    #[serde(rename = "starting energy")]
    pub starting_energy: Option<i32>,
    #[serde(rename = "sprint speed")]
    pub sprint_speed: i32,
}

impl From<Warframe> for WarframeDto {
    fn from(model: Warframe) -> Self {
        Self {
            id: model.id,
            name: model.name,
            health: model.health,
            shield: model.shield,
            armor: model.armor,
            energy: model.energy,
            starting_energy: model.starting_energy,
            sprint_speed: model.sprint_speed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WeaponPrimaryDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
    #[serde(rename = "fire rate")]
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

    #[serde(rename = "critical chance")]
    pub critical_chance: f64,
    #[serde(rename = "critical multi")]
    pub critical_multi: f64,
    pub multishot: f64,
    #[serde(rename = "punchthrough")]
    pub punch_through: f64,
    pub range: f64,
    #[serde(rename = "status chance")]
    pub status_chance: f64,

    #[serde(rename = "impact aoe")]
    pub impact_aoe: Option<i32>,
    #[serde(rename = "puncture aoe")]
    pub puncture_aoe: Option<i32>,
    #[serde(rename = "slash aoe")]
    pub slash_aoe: Option<i32>,
    #[serde(rename = "cold aoe")]
    pub cold_aoe: Option<i32>,
    #[serde(rename = "electricity aoe")]
    pub electricity_aoe: Option<i32>,
    #[serde(rename = "heat aoe")]
    pub heat_aoe: Option<i32>,
    #[serde(rename = "toxin aoe")]
    pub toxin_aoe: Option<i32>,
    #[serde(rename = "blast aoe")]
    pub blast_aoe: Option<i32>,
    #[serde(rename = "corrosive aoe")]
    pub corrosive_aoe: Option<i32>,
    #[serde(rename = "gas aoe")]
    pub gas_aoe: Option<i32>,
    #[serde(rename = "magnetic aoe")]
    pub magnetic_aoe: Option<i32>,
    #[serde(rename = "radiation aoe")]
    pub radiation_aoe: Option<i32>,
    #[serde(rename = "viral aoe")]
    pub viral_aoe: Option<i32>,

    #[serde(rename = "damage falloff")]
    pub dmg_falloff: Option<f64>,
    #[serde(rename = "range aoe")]
    pub range_aoe: Option<f64>,
}

impl From<WeaponPrimary> for WeaponPrimaryDto {
    fn from(model: WeaponPrimary) -> Self {
        Self {
            id: model.id,
            name: model.name,
            weapon_type: model.weapon_type,
            fire_rate: model.fire_rate,
            impact: model.impact,
            puncture: model.puncture,
            slash: model.slash,
            cold: model.cold,
            electricity: model.electricity,
            heat: model.heat,
            toxin: model.toxin,
            blast: model.blast,
            corrosive: model.corrosive,
            gas: model.gas,
            magnetic: model.magnetic,
            radiation: model.radiation,
            viral: model.viral,
            critical_chance: model.critical_chance,
            critical_multi: model.critical_multi,
            multishot: model.multishot,
            punch_through: model.punch_through,
            range: model.range,
            status_chance: model.status_chance,
            impact_aoe: model.impact_aoe,
            puncture_aoe: model.puncture_aoe,
            slash_aoe: model.slash_aoe,
            cold_aoe: model.cold_aoe,
            electricity_aoe: model.electricity_aoe,
            heat_aoe: model.heat_aoe,
            toxin_aoe: model.toxin_aoe,
            blast_aoe: model.blast_aoe,
            corrosive_aoe: model.corrosive_aoe,
            gas_aoe: model.gas_aoe,
            magnetic_aoe: model.magnetic_aoe,
            radiation_aoe: model.radiation_aoe,
            viral_aoe: model.viral_aoe,
            dmg_falloff: model.dmg_falloff,
            range_aoe: model.range_aoe,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
