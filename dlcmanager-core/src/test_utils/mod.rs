//! Test fixtures shared by the unit tests

use crate::catalog::{BlueprintId, CatalogEntry};
use crate::config::PluginConfig;
use std::collections::HashSet;

pub fn ids(raw: &[i32]) -> HashSet<BlueprintId> {
    raw.iter().copied().map(BlueprintId).collect()
}

pub fn names(raw: &[&str]) -> HashSet<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Three DLC blueprints `a`, `b`, `c` plus a base-game item that never qualifies
pub fn scenario_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::dlc(101, "a"),
        CatalogEntry::dlc(102, "b"),
        CatalogEntry::dlc(103, "c"),
        CatalogEntry::new(200, "rifle.ak", true, false),
    ]
}

/// Blacklists `b`, defaults `a`
pub fn scenario_config() -> PluginConfig {
    PluginConfig {
        blacklist: vec!["b".to_string()],
        default_blueprints: vec!["a".to_string()],
    }
}
