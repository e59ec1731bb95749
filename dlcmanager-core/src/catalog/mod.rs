/*
    catalog - Game item catalog view

    Provides:
    - Identifier and catalog entry types
    - The CatalogSource seam onto the game's blueprint list
    - CatalogFilter, the startup-time reduction to grantable blueprints
*/

pub mod filter;
pub mod types;

pub use filter::CatalogFilter;
pub use types::{BlueprintId, CatalogEntry, ItemShortName, PlayerId};

/// Read-only access to the game's blueprint list
pub trait CatalogSource {
    /// All known blueprints with their target item's flags
    fn entries(&self) -> Vec<CatalogEntry>;
}

impl CatalogSource for Vec<CatalogEntry> {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.clone()
    }
}

impl CatalogSource for [CatalogEntry] {
    fn entries(&self) -> Vec<CatalogEntry> {
        self.to_vec()
    }
}
