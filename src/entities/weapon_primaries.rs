use sea_orm::entity::prelude::*;

/// Primary weapon stats. Damage values are per-element; `*_aoe` columns hold
/// the area-of-effect portion for weapons that have one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weapon_primaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
