//! Walks one player through join, rejoin and reset with debug logging on
//!
//! Run with:
//! ```bash
//! cargo run --example grant_demo
//! ```

use dlcmanager_core::gateway::{MemoryPermissions, MemoryPlayerStore};
use dlcmanager_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use dlcmanager_core::{CatalogEntry, Orchestrator, PlayerId, PluginConfig, PERM_DEFAULT};
use std::collections::HashSet;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging_with_config(LogConfig::new(LogLevel::Debug))?;

    let catalog = vec![
        CatalogEntry::dlc(1, "barricade.medieval"),
        CatalogEntry::dlc(2, "door.double.hinged.bardoors"),
        CatalogEntry::dlc(3, "wall.frame.fence.gate"),
        CatalogEntry::new(4, "rifle.ak", true, false),
    ];
    let config = PluginConfig {
        blacklist: vec!["door.double.hinged.bardoors".to_string()],
        default_blueprints: vec!["barricade.medieval".to_string()],
    };

    let player = PlayerId::new("76561198000000001");
    let mut store = MemoryPlayerStore::new();
    store.insert(player.clone(), HashSet::new(), true);
    let mut permissions = MemoryPermissions::new();
    permissions.grant(player.clone(), PERM_DEFAULT);

    let mut orchestrator = Orchestrator::new(store, permissions);
    let report = orchestrator.on_startup(&catalog, &config)?;
    info!(granted = report.granted.len(), "Startup done");

    let again = orchestrator.on_player_connect(&player)?;
    info!(added = again.added, total = again.total, "Rejoin");

    orchestrator.reset_player(&player)?;
    info!(stats = ?orchestrator.stats(), "Finished");

    Ok(())
}
