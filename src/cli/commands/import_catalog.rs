//! Catalog seeding command handler

use std::path::Path;

use crate::config::Config;
use crate::db::Store;
use crate::models::catalog::CatalogFile;

pub async fn cmd_import_catalog(config: &Config, path: &Path) -> anyhow::Result<()> {
    let catalog = CatalogFile::load(path)?;
    let store = Store::new(&config.general.database_path).await?;

    println!(
        "Importing {} mods, {} warframes, {} primary weapons from {}",
        catalog.mods.len(),
        catalog.warframes.len(),
        catalog.weapons_primary.len(),
        path.display()
    );

    let summary = store.import_catalog(&catalog).await?;

    println!("✓ Import finished");
    println!("  Mods added:            {}", summary.mods);
    println!("  Warframes added:       {}", summary.warframes);
    println!("  Primary weapons added: {}", summary.weapons_primary);

    Ok(())
}
