pub use super::builds::Entity as Builds;
pub use super::mods::Entity as Mods;
pub use super::users::Entity as Users;
pub use super::warframes::Entity as Warframes;
pub use super::weapon_primaries::Entity as WeaponPrimaries;
