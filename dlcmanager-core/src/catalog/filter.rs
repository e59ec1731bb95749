/*
    filter.rs - Eligible blueprint sets

    Reduces the raw game catalog to the blueprints this plugin hands out.
    Built once at startup and shared read-only afterwards.
*/

use super::types::{BlueprintId, CatalogEntry};
use std::collections::HashSet;
use tracing::debug;

/// Blueprint sets derived from the catalog and the plugin config
///
/// Invariant: `default_set ⊆ eligible`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    eligible: HashSet<BlueprintId>,
    default_set: HashSet<BlueprintId>,
}

impl CatalogFilter {
    /// Filter the catalog.
    ///
    /// An entry is eligible when it is craftable, DLC-gated and its short name
    /// is not blacklisted. Eligible entries whose short name is listed in
    /// `default_names` also land in the default set. Duplicate ids collapse.
    pub fn build<'a, I>(catalog: I, blacklist: &HashSet<String>, default_names: &HashSet<String>) -> Self
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        let mut filter = CatalogFilter::default();
        let mut blacklisted = 0usize;

        for entry in catalog {
            if !entry.is_dlc_blueprint() {
                continue;
            }
            if blacklist.contains(&entry.short_name) {
                blacklisted += 1;
                continue;
            }
            if default_names.contains(&entry.short_name) {
                filter.default_set.insert(entry.blueprint_id);
            }
            filter.eligible.insert(entry.blueprint_id);
        }

        debug!(
            eligible = filter.eligible.len(),
            default = filter.default_set.len(),
            blacklisted,
            "Catalog filter built"
        );

        filter
    }

    /// Every blueprint this plugin may grant
    pub fn eligible(&self) -> &HashSet<BlueprintId> {
        &self.eligible
    }

    /// Eligible blueprints named in the default list.
    ///
    /// Not consumed by the grant path; the default tier receives all of
    /// [`eligible`](Self::eligible).
    pub fn default_set(&self) -> &HashSet<BlueprintId> {
        &self.default_set
    }

    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ids, names};

    #[test]
    fn test_scenario_blacklist_and_defaults() {
        let catalog = vec![
            CatalogEntry::dlc(101, "a"),
            CatalogEntry::dlc(102, "b"),
            CatalogEntry::dlc(103, "c"),
        ];

        let filter = CatalogFilter::build(&catalog, &names(&["b"]), &names(&["a"]));

        assert_eq!(filter.eligible(), &ids(&[101, 103]));
        assert_eq!(filter.default_set(), &ids(&[101]));
    }

    #[test]
    fn test_non_craftable_and_base_game_items_are_skipped() {
        let catalog = vec![
            CatalogEntry::new(1, "rifle.ak", true, false),
            CatalogEntry::new(2, "rock.skin", false, true),
            CatalogEntry::new(3, "wall.frame.garagedoor", false, false),
            CatalogEntry::dlc(4, "barricade.medieval"),
        ];

        let filter = CatalogFilter::build(&catalog, &HashSet::new(), &names(&["rifle.ak", "barricade.medieval"]));

        assert_eq!(filter.eligible(), &ids(&[4]));
        assert_eq!(filter.default_set(), &ids(&[4]));
    }

    #[test]
    fn test_blacklisted_default_is_not_in_default_set() {
        let catalog = vec![CatalogEntry::dlc(7, "door.double.hinged.bardoors")];
        let both = names(&["door.double.hinged.bardoors"]);

        let filter = CatalogFilter::build(&catalog, &both, &both);

        assert!(filter.is_empty());
        assert!(filter.default_set().is_empty());
    }

    #[test]
    fn test_default_names_not_in_catalog_are_ignored() {
        let catalog = vec![CatalogEntry::dlc(5, "a")];

        let filter = CatalogFilter::build(&catalog, &HashSet::new(), &names(&["shortname", "missing"]));

        assert_eq!(filter.eligible(), &ids(&[5]));
        assert!(filter.default_set().is_empty());
    }

    #[test]
    fn test_empty_catalog_yields_empty_sets() {
        let filter = CatalogFilter::build(&Vec::<CatalogEntry>::new(), &names(&["a"]), &names(&["a"]));
        assert!(filter.is_empty());
        assert!(filter.default_set().is_empty());
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let catalog = vec![CatalogEntry::dlc(9, "x"), CatalogEntry::dlc(9, "x")];
        let filter = CatalogFilter::build(&catalog, &HashSet::new(), &HashSet::new());
        assert_eq!(filter.eligible().len(), 1);
    }
}
