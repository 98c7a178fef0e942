//! List mods command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_mods(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let mods = store.list_mods().await?;

    if mods.is_empty() {
        println!("The mod catalog is empty.");
        println!();
        println!("Seed it with: arsenal import-catalog <catalog.json>");
        return Ok(());
    }

    println!("Mods ({} total)", mods.len());
    println!("{:-<70}", "");

    for m in mods {
        println!("{} [{}]", m.name, m.rarity);
        println!(
            "  ID: {} | Polarity: {} | Drain: {} | Rank: {} | Type: {}",
            m.id, m.polarity, m.drain, m.rank, m.mod_type
        );
        println!("  {}", m.effect);
    }

    Ok(())
}
