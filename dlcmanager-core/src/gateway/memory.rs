//! In-memory host collaborators

use super::{GatewayError, GatewayResult, PermissionService, PlayerGateway};
use crate::catalog::{BlueprintId, PlayerId};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::trace;

/// Stored state for one player
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub unlocked: HashSet<BlueprintId>,
    pub online: bool,
}

/// Player store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPlayerStore {
    players: BTreeMap<PlayerId, PlayerRecord>,
    notifications: HashMap<PlayerId, usize>,
    fail_writes: bool,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a player
    pub fn insert(&mut self, player: impl Into<PlayerId>, unlocked: HashSet<BlueprintId>, online: bool) {
        self.players.insert(player.into(), PlayerRecord { unlocked, online });
    }

    pub fn set_online(&mut self, player: &PlayerId, online: bool) -> GatewayResult<()> {
        let record = self
            .players
            .get_mut(player)
            .ok_or_else(|| GatewayError::UnknownPlayer(player.to_string()))?;
        record.online = online;
        Ok(())
    }

    pub fn record(&self, player: &PlayerId) -> Option<&PlayerRecord> {
        self.players.get(player)
    }

    pub fn records(&self) -> impl Iterator<Item = (&PlayerId, &PlayerRecord)> {
        self.players.iter()
    }

    /// How many client syncs `player` has received
    pub fn notifications_for(&self, player: &PlayerId) -> usize {
        self.notifications.get(player).copied().unwrap_or(0)
    }

    /// Make every subsequent `set_unlocked` fail
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl PlayerGateway for MemoryPlayerStore {
    fn connected_players(&self) -> GatewayResult<Vec<PlayerId>> {
        Ok(self
            .players
            .iter()
            .filter(|(_, record)| record.online)
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn get_unlocked(&self, player: &PlayerId) -> GatewayResult<HashSet<BlueprintId>> {
        self.players
            .get(player)
            .map(|record| record.unlocked.clone())
            .ok_or_else(|| GatewayError::UnknownPlayer(player.to_string()))
    }

    fn set_unlocked(&mut self, player: &PlayerId, unlocked: HashSet<BlueprintId>) -> GatewayResult<()> {
        if self.fail_writes {
            return Err(GatewayError::Persistence {
                player: player.to_string(),
                reason: "store is read-only".to_string(),
            });
        }
        self.players.entry(player.clone()).or_default().unlocked = unlocked;
        Ok(())
    }

    fn notify_client(&mut self, player: &PlayerId) -> GatewayResult<()> {
        trace!(%player, "Client sync");
        *self.notifications.entry(player.clone()).or_insert(0) += 1;
        Ok(())
    }
}

/// Permission grants held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPermissions {
    registered: HashSet<String>,
    grants: HashMap<PlayerId, HashSet<String>>,
}

impl MemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, player: impl Into<PlayerId>, key: impl Into<String>) {
        self.grants.entry(player.into()).or_default().insert(key.into());
    }

    pub fn revoke(&mut self, player: &PlayerId, key: &str) {
        if let Some(keys) = self.grants.get_mut(player) {
            keys.remove(key);
        }
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.registered.contains(key)
    }

    /// Keys held by `player`, sorted
    pub fn keys_for(&self, player: &PlayerId) -> Vec<String> {
        let mut keys: Vec<String> = self
            .grants
            .get(player)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl PermissionService for MemoryPermissions {
    fn register_permission(&mut self, key: &str) {
        self.registered.insert(key.to_string());
    }

    fn has_permission(&self, player: &PlayerId, key: &str) -> GatewayResult<bool> {
        Ok(self
            .grants
            .get(player)
            .is_some_and(|keys| keys.contains(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ids;

    #[test]
    fn test_connected_players_only_lists_online() {
        let mut store = MemoryPlayerStore::new();
        store.insert("1", HashSet::new(), true);
        store.insert("2", HashSet::new(), false);
        store.insert("3", HashSet::new(), true);

        let online = store.connected_players().unwrap();
        assert_eq!(online, vec![PlayerId::from("1"), PlayerId::from("3")]);
    }

    #[test]
    fn test_get_unknown_player_fails() {
        let store = MemoryPlayerStore::new();
        let err = store.get_unlocked(&PlayerId::from("missing")).unwrap_err();
        assert_eq!(err, GatewayError::UnknownPlayer("missing".to_string()));
    }

    #[test]
    fn test_set_and_notify() {
        let mut store = MemoryPlayerStore::new();
        let player = PlayerId::from("1");
        store.insert("1", HashSet::new(), true);

        store.set_unlocked(&player, ids(&[1, 2])).unwrap();
        store.notify_client(&player).unwrap();
        store.notify_client(&player).unwrap();

        assert_eq!(store.get_unlocked(&player).unwrap(), ids(&[1, 2]));
        assert_eq!(store.notifications_for(&player), 2);
        assert_eq!(store.notifications_for(&PlayerId::from("2")), 0);
    }

    #[test]
    fn test_failing_writes_leave_record_untouched() {
        let mut store = MemoryPlayerStore::new();
        let player = PlayerId::from("1");
        store.insert("1", ids(&[5]), true);
        store.fail_writes(true);

        let err = store.set_unlocked(&player, ids(&[5, 6])).unwrap_err();
        assert!(matches!(err, GatewayError::Persistence { .. }));
        assert_eq!(store.get_unlocked(&player).unwrap(), ids(&[5]));
    }

    #[test]
    fn test_permission_grant_and_revoke() {
        let mut perms = MemoryPermissions::new();
        let player = PlayerId::from("1");
        perms.register_permission("dlcmanager.default");
        perms.grant("1", "dlcmanager.default");

        assert!(perms.is_registered("dlcmanager.default"));
        assert!(perms.has_permission(&player, "dlcmanager.default").unwrap());
        assert!(!perms.has_permission(&player, "dlcmanager.admin").unwrap());

        perms.revoke(&player, "dlcmanager.default");
        assert!(!perms.has_permission(&player, "dlcmanager.default").unwrap());
        assert!(perms.keys_for(&player).is_empty());
    }
}
