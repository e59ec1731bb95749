/*
    orchestrator - Join-time grant sequence

    Owns the host collaborators and the cached catalog filter, and exposes the
    synchronous entry points the host adapter calls:
    - on_startup: build the filter once, then catch up connected players
    - on_player_connect: tier → entitlement → reconcile → persist → notify
    - reset_player / run_command: the administrative rollback
*/

use crate::catalog::{BlueprintId, CatalogFilter, CatalogSource, PlayerId};
use crate::command::{AdminCommand, Caller, CommandError};
use crate::config::PluginConfig;
use crate::entitlement::{EntitlementResolver, PermissionTier, PERMISSIONS, PERM_ADMIN};
use crate::error::GrantResult;
use crate::gateway::{GatewayError, GatewayResult, PermissionService, PlayerGateway};
use crate::metrics::{self, GrantCollector, GrantSnapshot};
use crate::reconcile::{Reconciliation, UnlockReconciler};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info};

/// What one connect sequence did for a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantOutcome {
    pub player: PlayerId,
    pub tier: PermissionTier,
    /// Blueprints newly unlocked by this connect
    pub added: usize,
    /// Size of the record after the merge
    pub total: usize,
    pub changed: bool,
}

/// Result of the startup pass over already-connected players
#[derive(Debug, Default)]
pub struct CatchUpReport {
    pub granted: Vec<GrantOutcome>,
    /// Players whose sequence failed; they are not retried
    pub failed: Vec<(PlayerId, GatewayError)>,
}

pub struct Orchestrator<G, P> {
    gateway: G,
    permissions: P,
    filter: Arc<CatalogFilter>,
    stats: GrantCollector,
}

impl<G, P> std::fmt::Debug for Orchestrator<G, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("eligible", &self.filter.eligible().len())
            .field("stats", &self.stats.snapshot())
            .finish_non_exhaustive()
    }
}

impl<G, P> Orchestrator<G, P>
where
    G: PlayerGateway,
    P: PermissionService,
{
    /// Register the plugin's permissions. Until [`initialize`](Self::initialize)
    /// runs the filter is empty, so early connects grant nothing.
    pub fn new(gateway: G, permissions: P) -> Self {
        Self::with_filter(gateway, permissions, Arc::new(CatalogFilter::default()))
    }

    /// Start from an already built filter
    pub fn with_filter(gateway: G, mut permissions: P, filter: Arc<CatalogFilter>) -> Self {
        for key in PERMISSIONS {
            permissions.register_permission(key);
        }

        Self {
            gateway,
            permissions,
            filter,
            stats: GrantCollector::new(),
        }
    }

    /// Build and cache the catalog filter
    pub fn initialize<C>(&mut self, catalog: &C, config: &PluginConfig) -> Arc<CatalogFilter>
    where
        C: CatalogSource + ?Sized,
    {
        let entries = catalog.entries();
        let filter = CatalogFilter::build(&entries, &config.blacklist_set(), &config.default_set());

        info!(
            catalog = entries.len(),
            eligible = filter.eligible().len(),
            default = filter.default_set().len(),
            "Blueprint catalog ready"
        );
        metrics::record_gauge(metrics::ELIGIBLE_BLUEPRINTS, filter.eligible().len() as f64);

        self.filter = Arc::new(filter);
        Arc::clone(&self.filter)
    }

    /// Run the connect sequence for every player online right now.
    ///
    /// A failure for one player is logged and reported; the pass continues
    /// with the rest.
    pub fn catch_up(&mut self) -> GrantResult<CatchUpReport> {
        let players = self.gateway.connected_players().inspect_err(|_| self.stats.record_failure())?;
        debug!(players = players.len(), "Catching up connected players");

        let mut report = CatchUpReport::default();
        for player in players {
            match self.connect(&player) {
                Ok(outcome) => report.granted.push(outcome),
                Err(e) => {
                    error!(%player, error = %e, "Blueprint grant failed");
                    report.failed.push((player, e));
                }
            }
        }

        Ok(report)
    }

    /// [`initialize`](Self::initialize) followed immediately by [`catch_up`](Self::catch_up)
    pub fn on_startup<C>(&mut self, catalog: &C, config: &PluginConfig) -> GrantResult<CatchUpReport>
    where
        C: CatalogSource + ?Sized,
    {
        self.initialize(catalog, config);
        self.catch_up()
    }

    /// Grant whatever the player's current tier entitles them to
    pub fn on_player_connect(&mut self, player: &PlayerId) -> GrantResult<GrantOutcome> {
        Ok(self.connect(player)?)
    }

    /// Grant for an already known tier
    pub fn grant_for_tier(&mut self, player: &PlayerId, tier: PermissionTier) -> GrantResult<GrantOutcome> {
        let entitlement = EntitlementResolver::resolve(tier, &self.filter);
        Ok(self
            .apply(player, tier, &entitlement)
            .inspect_err(|_| self.stats.record_failure())?)
    }

    /// Wipe a player's unlocks and sync the client
    pub fn reset_player(&mut self, player: &PlayerId) -> GrantResult<Reconciliation> {
        let result = self.reset(player).inspect_err(|_| self.stats.record_failure())?;
        self.stats.record_reset();
        info!(%player, changed = result.changed, "Blueprints reset");
        Ok(result)
    }

    /// Execute the console command and return the reply for the caller
    pub fn run_command<S: AsRef<str>>(&mut self, caller: &Caller, args: &[S]) -> GrantResult<String> {
        self.authorize(caller)?;

        match AdminCommand::parse(args)? {
            AdminCommand::Reset { target } => {
                let result = self.reset_player(&target)?;
                Ok(if result.changed {
                    format!("Reset blueprints of {}", target)
                } else {
                    format!("{} had no unlocked blueprints", target)
                })
            }
        }
    }

    pub fn filter(&self) -> &Arc<CatalogFilter> {
        &self.filter
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut P {
        &mut self.permissions
    }

    pub fn stats(&self) -> GrantSnapshot {
        self.stats.snapshot()
    }

    pub fn into_parts(self) -> (G, P) {
        (self.gateway, self.permissions)
    }

    fn authorize(&self, caller: &Caller) -> GrantResult<()> {
        match caller {
            Caller::Console => Ok(()),
            Caller::Player(id) => {
                if self.permissions.has_permission(id, PERM_ADMIN)? {
                    Ok(())
                } else {
                    Err(CommandError::PermissionDenied(caller.to_string()).into())
                }
            }
        }
    }

    fn connect(&mut self, player: &PlayerId) -> GatewayResult<GrantOutcome> {
        let tier = PermissionTier::of(&self.permissions, player).inspect_err(|_| self.stats.record_failure())?;
        let entitlement = EntitlementResolver::resolve(tier, &self.filter);
        self.apply(player, tier, &entitlement)
            .inspect_err(|_| self.stats.record_failure())
    }

    // The client is notified on every connect, even when nothing was added.
    fn apply(
        &mut self,
        player: &PlayerId,
        tier: PermissionTier,
        entitlement: &HashSet<BlueprintId>,
    ) -> GatewayResult<GrantOutcome> {
        let existing = self.gateway.get_unlocked(player)?;
        let result = UnlockReconciler::reconcile(&existing, entitlement);
        let (added, changed, total) = (result.added, result.changed, result.updated.len());

        self.gateway.set_unlocked(player, result.updated)?;
        self.gateway.notify_client(player)?;
        self.stats.record_reconcile(added);

        if changed {
            info!(%player, %tier, added, total, "Unlocked blueprints");
        } else {
            debug!(%player, %tier, total, "No new blueprints");
        }

        Ok(GrantOutcome {
            player: player.clone(),
            tier,
            added,
            total,
            changed,
        })
    }

    fn reset(&mut self, player: &PlayerId) -> GatewayResult<Reconciliation> {
        let existing = self.gateway.get_unlocked(player)?;
        let result = UnlockReconciler::reset(&existing);

        self.gateway.set_unlocked(player, result.updated.clone())?;
        self.gateway.notify_client(player)?;

        Ok(result)
    }
}
