/*
    types.rs - Identifiers and catalog rows

    Defines:
    - BlueprintId: numeric item id a blueprint unlocks
    - PlayerId: host-side player identity string
    - CatalogEntry: one blueprint as reported by the game catalog
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Item id of the blueprint target; stable for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlueprintId(pub i32);

impl fmt::Display for BlueprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for BlueprintId {
    fn from(id: i32) -> Self {
        BlueprintId(id)
    }
}

/// Item short name as written in the plugin config
pub type ItemShortName = String;

/// Player identity as the host reports it (a numeric id rendered as a string)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId(id.to_string())
    }
}

/// A blueprint known to the game's item catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub blueprint_id: BlueprintId,
    pub short_name: ItemShortName,
    /// The item can be crafted by players at all
    pub user_craftable: bool,
    /// Crafting is gated behind owning a DLC
    pub requires_dlc: bool,
}

impl CatalogEntry {
    pub fn new(
        blueprint_id: impl Into<BlueprintId>,
        short_name: impl Into<String>,
        user_craftable: bool,
        requires_dlc: bool,
    ) -> Self {
        CatalogEntry {
            blueprint_id: blueprint_id.into(),
            short_name: short_name.into(),
            user_craftable,
            requires_dlc,
        }
    }

    /// Shorthand for a craftable, DLC-gated entry
    pub fn dlc(blueprint_id: impl Into<BlueprintId>, short_name: impl Into<String>) -> Self {
        Self::new(blueprint_id, short_name, true, true)
    }

    /// Craftable and DLC-gated; blacklisting is checked separately
    pub fn is_dlc_blueprint(&self) -> bool {
        self.user_craftable && self.requires_dlc
    }
}
