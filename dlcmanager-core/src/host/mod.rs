//! Async adapter between a game host's events and the synchronous core
//!
//! The host calls [`PluginHost::start`] once when the server finishes loading
//! and [`PluginHost::player_connected`] for every join. Startup defers the
//! catch-up pass so the player registry can settle first.

mod diagnostics;

pub use diagnostics::CorruptConfigWarning;

use crate::catalog::{CatalogFilter, CatalogSource, PlayerId};
use crate::command::Caller;
use crate::config::{ConfigLoad, ConfigSource, HostSettings, PluginConfig};
use crate::error::{GrantError, GrantResult};
use crate::gateway::{PermissionService, PlayerGateway};
use crate::orchestrator::{CatchUpReport, GrantOutcome, Orchestrator};
use crate::shutdown::ShutdownCoordinator;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Handles produced by [`PluginHost::start`]
#[derive(Debug)]
pub struct Started {
    pub config: ConfigLoad,
    pub filter: Arc<CatalogFilter>,
    /// Deferred pass over players already online
    pub catch_up: JoinHandle<GrantResult<CatchUpReport>>,
    /// Present only when the config file was corrupt
    pub warning: Option<CorruptConfigWarning>,
}

pub struct PluginHost<G, P> {
    orchestrator: Arc<Mutex<Orchestrator<G, P>>>,
    settings: HostSettings,
    shutdown: Arc<ShutdownCoordinator>,
}

impl<G, P> PluginHost<G, P>
where
    G: PlayerGateway + Send + 'static,
    P: PermissionService + Send + 'static,
{
    pub fn new(orchestrator: Orchestrator<G, P>, settings: HostSettings, shutdown: Arc<ShutdownCoordinator>) -> Self {
        Self {
            orchestrator: Arc::new(Mutex::new(orchestrator)),
            settings,
            shutdown,
        }
    }

    /// Load the plugin config from the configured path and start up
    pub async fn start<C>(&self, catalog: &C) -> Started
    where
        C: CatalogSource + ?Sized,
    {
        let config = PluginConfig::load(&self.settings.plugin_config);
        self.start_with(catalog, config).await
    }

    /// Start up with an already loaded config
    pub async fn start_with<C>(&self, catalog: &C, config: ConfigLoad) -> Started
    where
        C: CatalogSource + ?Sized,
    {
        let warning = match &config.source {
            ConfigSource::Corrupt(reason) => Some(CorruptConfigWarning::spawn(
                reason.clone(),
                self.settings.corrupt_warning_interval,
                &self.shutdown,
            )),
            _ => None,
        };

        let filter = self.orchestrator.lock().await.initialize(catalog, &config.config);

        let orchestrator = Arc::clone(&self.orchestrator);
        let delay = self.settings.catch_up_delay;
        let catch_up = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let report = orchestrator.lock().await.catch_up()?;
            info!(
                granted = report.granted.len(),
                failed = report.failed.len(),
                "Startup catch-up finished"
            );
            Ok::<_, GrantError>(report)
        });

        Started {
            config,
            filter,
            catch_up,
            warning,
        }
    }

    pub async fn player_connected(&self, player: &PlayerId) -> GrantResult<GrantOutcome> {
        self.orchestrator.lock().await.on_player_connect(player)
    }

    pub async fn console_command(&self, caller: &Caller, args: &[String]) -> GrantResult<String> {
        let result = self.orchestrator.lock().await.run_command(caller, args);
        if let Err(e) = &result {
            warn!(%caller, error = %e, "Console command rejected");
        }
        result
    }

    pub fn orchestrator(&self) -> &Arc<Mutex<Orchestrator<G, P>>> {
        &self.orchestrator
    }

    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }
}
