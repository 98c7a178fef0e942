pub mod prelude;

pub mod builds;
pub mod mods;
pub mod users;
pub mod warframes;
pub mod weapon_primaries;
