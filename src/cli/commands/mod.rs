mod import_catalog;
mod init;
mod mods;
mod serve;

pub use import_catalog::cmd_import_catalog;
pub use init::cmd_init;
pub use mods::cmd_list_mods;
pub use serve::cmd_serve;
