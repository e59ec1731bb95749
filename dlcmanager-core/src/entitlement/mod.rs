//! Permission tiers and what each tier is entitled to

use crate::catalog::{BlueprintId, CatalogFilter, PlayerId};
use crate::gateway::{GatewayResult, PermissionService};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Grants the full eligible catalog at join
pub const PERM_DEFAULT: &str = "dlcmanager.default";
/// Operator access to the console command
pub const PERM_ADMIN: &str = "dlcmanager.admin";

/// Every key the plugin registers with the host
pub const PERMISSIONS: [&str; 2] = [PERM_ADMIN, PERM_DEFAULT];

/// The strongest recognised permission a player holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionTier {
    Default,
    /// Administrative access only; grants nothing at join
    Admin,
    None,
}

impl PermissionTier {
    /// Look up a player's tier. Holding the default key wins over admin.
    pub fn of<P: PermissionService + ?Sized>(permissions: &P, player: &PlayerId) -> GatewayResult<Self> {
        if permissions.has_permission(player, PERM_DEFAULT)? {
            return Ok(PermissionTier::Default);
        }
        if permissions.has_permission(player, PERM_ADMIN)? {
            return Ok(PermissionTier::Admin);
        }
        Ok(PermissionTier::None)
    }

    pub fn permission_key(&self) -> Option<&'static str> {
        match self {
            PermissionTier::Default => Some(PERM_DEFAULT),
            PermissionTier::Admin => Some(PERM_ADMIN),
            PermissionTier::None => None,
        }
    }
}

impl fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionTier::Default => f.write_str("default"),
            PermissionTier::Admin => f.write_str("admin"),
            PermissionTier::None => f.write_str("none"),
        }
    }
}

/// Maps a tier to the blueprints it unlocks
#[derive(Debug, Clone, Copy, Default)]
pub struct EntitlementResolver;

impl EntitlementResolver {
    /// The default tier receives every eligible blueprint, not just the
    /// configured default set. Other tiers receive nothing.
    pub fn resolve(tier: PermissionTier, filter: &CatalogFilter) -> HashSet<BlueprintId> {
        match tier {
            PermissionTier::Default => filter.eligible().clone(),
            PermissionTier::Admin | PermissionTier::None => HashSet::new(),
        }
    }
}
