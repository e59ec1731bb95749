//! Grants DLC blueprint unlocks to players at join time.
//!
//! The game host is reached only through the traits in [`gateway`]; the
//! grant logic itself lives in [`catalog`], [`entitlement`], [`reconcile`] and
//! [`orchestrator`]. [`host`] adapts host events onto the synchronous core.

pub mod catalog;
pub mod command;
pub mod config;
pub mod entitlement;
pub mod error;
pub mod gateway;
pub mod host;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod reconcile;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod test_utils;

pub use catalog::{BlueprintId, CatalogEntry, CatalogFilter, CatalogSource, PlayerId};
pub use command::{AdminCommand, Caller, CommandError};
pub use config::{ConfigLoad, ConfigSource, HostSettings, PluginConfig};
pub use entitlement::{EntitlementResolver, PermissionTier, PERM_ADMIN, PERM_DEFAULT};
pub use error::{GrantError, GrantResult};
pub use gateway::{GatewayError, PermissionService, PlayerGateway};
pub use logging::{init_logging, LogLevel};
pub use orchestrator::{CatchUpReport, GrantOutcome, Orchestrator};
pub use reconcile::{Reconciliation, UnlockReconciler};
