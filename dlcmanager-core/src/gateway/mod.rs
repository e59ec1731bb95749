/*
    gateway - Seams onto the game host

    The core never talks to the game directly. Everything it needs from the
    host goes through these traits:
    - PermissionService: permission registration and membership checks
    - PlayerGateway: unlock record read/write, client sync, online roster

    In-memory implementations back the tests and the CLI world file.
*/

pub mod error;
pub mod memory;
pub mod world;

pub use error::{GatewayError, GatewayResult};
pub use memory::{MemoryPermissions, MemoryPlayerStore};
pub use world::{WorldFile, WorldPlayer};

use crate::catalog::{BlueprintId, PlayerId};
use std::collections::HashSet;

/// Host permission subsystem
pub trait PermissionService {
    /// Make a permission key known to the host; called once at init
    fn register_permission(&mut self, key: &str);

    /// Whether `player` holds `key`
    fn has_permission(&self, player: &PlayerId, key: &str) -> GatewayResult<bool>;
}

/// Host player persistence and network sync
///
/// Every `set_unlocked` must be followed by a `notify_client` for the change
/// to reach the connected client.
pub trait PlayerGateway {
    /// Players connected right now
    fn connected_players(&self) -> GatewayResult<Vec<PlayerId>>;

    fn get_unlocked(&self, player: &PlayerId) -> GatewayResult<HashSet<BlueprintId>>;

    fn set_unlocked(&mut self, player: &PlayerId, unlocked: HashSet<BlueprintId>) -> GatewayResult<()>;

    /// Push the persisted record to the player's client
    fn notify_client(&mut self, player: &PlayerId) -> GatewayResult<()>;
}
