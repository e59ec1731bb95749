/*
    world.rs - JSON snapshot of a game server

    Lets the CLI stand in for a running game: the catalog, each player's
    permissions, online state and unlocked blueprints are read from one file,
    loaded into the in-memory collaborators, and written back afterwards.
*/

use super::{GatewayResult, MemoryPermissions, MemoryPlayerStore};
use crate::catalog::{BlueprintId, CatalogEntry, PlayerId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One player in the world file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldPlayer {
    pub id: PlayerId,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub unlocked: Vec<BlueprintId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldFile {
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub players: Vec<WorldPlayer>,
}

impl WorldFile {
    pub fn load(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let world: WorldFile = serde_json::from_str(&contents)?;
        debug!(
            path = %path.as_ref().display(),
            catalog = world.catalog.len(),
            players = world.players.len(),
            "World loaded"
        );
        Ok(world)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GatewayResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Split into the catalog and populated collaborators
    pub fn into_parts(self) -> (Vec<CatalogEntry>, MemoryPlayerStore, MemoryPermissions) {
        let mut store = MemoryPlayerStore::new();
        let mut permissions = MemoryPermissions::new();

        for player in self.players {
            for key in player.permissions {
                permissions.grant(player.id.clone(), key);
            }
            store.insert(player.id, player.unlocked.into_iter().collect(), player.online);
        }

        (self.catalog, store, permissions)
    }

    /// Rebuild a world file from collaborator state; unlocks are written sorted
    pub fn from_parts(catalog: Vec<CatalogEntry>, store: &MemoryPlayerStore, permissions: &MemoryPermissions) -> Self {
        let players = store
            .records()
            .map(|(id, record)| {
                let mut unlocked: Vec<BlueprintId> = record.unlocked.iter().copied().collect();
                unlocked.sort();
                WorldPlayer {
                    id: id.clone(),
                    online: record.online,
                    permissions: permissions.keys_for(id),
                    unlocked,
                }
            })
            .collect();

        WorldFile { catalog, players }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{PermissionService, PlayerGateway};
    use crate::test_utils::ids;
    use tempfile::TempDir;

    fn sample() -> WorldFile {
        WorldFile {
            catalog: vec![CatalogEntry::dlc(101, "a"), CatalogEntry::new(200, "rock", true, false)],
            players: vec![
                WorldPlayer {
                    id: PlayerId::from("1"),
                    online: true,
                    permissions: vec!["dlcmanager.default".to_string()],
                    unlocked: vec![BlueprintId(5)],
                },
                WorldPlayer {
                    id: PlayerId::from("2"),
                    online: false,
                    permissions: vec![],
                    unlocked: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.json");

        sample().save(&path).unwrap();
        let loaded = WorldFile::load(&path).unwrap();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_missing_fields_default() {
        let world: WorldFile = serde_json::from_str(r#"{"players":[{"id":"9"}]}"#).unwrap();
        assert!(world.catalog.is_empty());
        assert!(!world.players[0].online);
        assert!(world.players[0].unlocked.is_empty());
    }

    #[test]
    fn test_into_parts_populates_collaborators() {
        let (catalog, store, perms) = sample().into_parts();
        let one = PlayerId::from("1");

        assert_eq!(catalog.len(), 2);
        assert_eq!(store.connected_players().unwrap(), vec![one.clone()]);
        assert_eq!(store.get_unlocked(&one).unwrap(), ids(&[5]));
        assert!(perms.has_permission(&one, "dlcmanager.default").unwrap());
    }

    #[test]
    fn test_from_parts_sorts_unlocks() {
        let (catalog, mut store, perms) = sample().into_parts();
        store.set_unlocked(&PlayerId::from("1"), ids(&[9, 3, 5])).unwrap();

        let world = WorldFile::from_parts(catalog, &store, &perms);

        assert_eq!(world.players[0].unlocked, vec![BlueprintId(3), BlueprintId(5), BlueprintId(9)]);
        assert_eq!(world.players[0].permissions, vec!["dlcmanager.default".to_string()]);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(WorldFile::load(&path), Err(crate::gateway::GatewayError::Format(_))));
    }
}
