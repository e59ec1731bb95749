use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dlcmanager_core::gateway::{MemoryPermissions, MemoryPlayerStore, WorldFile};
use dlcmanager_core::host::PluginHost;
use dlcmanager_core::logging::{init_logging_with_config, LogLevel};
use dlcmanager_core::metrics::init_metrics;
use dlcmanager_core::shutdown::{install_signal_handlers, ShutdownCoordinator};
use dlcmanager_core::{Caller, HostSettings, Orchestrator, PlayerId, PluginConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "dlcmanager")]
#[command(author, version, about = "Grant DLC blueprints to players at join", long_about = None)]
struct Args {
    /// Host settings file (TOML); defaults plus DLCMANAGER_* overrides when omitted
    #[arg(short, long, global = true)]
    settings: Option<PathBuf>,

    /// Plugin config file (JSON); overrides the settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,

    /// Enable JSON formatted logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Server start: build the catalog, then grant to everyone online
    Run {
        /// World snapshot (JSON) standing in for the game server
        #[arg(short, long)]
        world: PathBuf,

        /// Keep running until Ctrl+C after the startup pass
        #[arg(long)]
        stay: bool,
    },
    /// A single player joins
    Connect {
        #[arg(short, long)]
        world: PathBuf,

        player: String,
    },
    /// Console command: wipe a player's unlocked blueprints
    Reset {
        #[arg(short, long)]
        world: PathBuf,

        player: String,

        /// Run the command as this player instead of the server console
        #[arg(long = "as")]
        as_player: Option<String>,
    },
    /// Print the effective plugin config
    ShowConfig,
}

fn load_settings(args: &Args) -> Result<HostSettings> {
    let mut settings = match &args.settings {
        Some(path) => HostSettings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => HostSettings::default(),
    };
    settings.apply_env().context("applying environment overrides")?;

    if let Some(config) = &args.config {
        settings.plugin_config = config.clone();
    }
    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    if args.json_logs {
        settings.logging.json_format = true;
    }

    Ok(settings)
}

type WorldOrchestrator = Orchestrator<MemoryPlayerStore, MemoryPermissions>;

/// Load the world and build an initialized orchestrator for one-shot commands
fn open_world(world: &Path, settings: &HostSettings) -> Result<(Vec<dlcmanager_core::CatalogEntry>, WorldOrchestrator)> {
    let (catalog, store, permissions) = WorldFile::load(world)
        .with_context(|| format!("loading world from {}", world.display()))?
        .into_parts();

    let config = PluginConfig::load(&settings.plugin_config);
    let mut orchestrator = Orchestrator::new(store, permissions);
    orchestrator.initialize(&catalog, &config.config);

    Ok((catalog, orchestrator))
}

fn save_world(world: &Path, catalog: Vec<dlcmanager_core::CatalogEntry>, orchestrator: &WorldOrchestrator) -> Result<()> {
    WorldFile::from_parts(catalog, orchestrator.gateway(), orchestrator.permissions())
        .save(world)
        .with_context(|| format!("saving world to {}", world.display()))
}

async fn run(world: &Path, stay: bool, settings: HostSettings) -> Result<()> {
    let (catalog, store, permissions) = WorldFile::load(world)
        .with_context(|| format!("loading world from {}", world.display()))?
        .into_parts();

    let shutdown = Arc::new(ShutdownCoordinator::new(settings.shutdown_grace));
    install_signal_handlers(Arc::clone(&shutdown)).context("installing signal handlers")?;

    let host = PluginHost::new(Orchestrator::new(store, permissions), settings, Arc::clone(&shutdown));
    let started = host.start(&catalog).await;

    let report = started.catch_up.await.context("catch-up task panicked")??;
    for (player, error) in &report.failed {
        warn!(%player, %error, "Player was not granted blueprints");
    }

    {
        let orchestrator = host.orchestrator().lock().await;
        save_world(world, catalog, &orchestrator)?;
        let stats = orchestrator.stats();
        info!(
            eligible = started.filter.eligible().len(),
            players = stats.players_reconciled,
            granted = stats.blueprints_granted,
            failed = report.failed.len(),
            "Startup pass complete"
        );
    }

    if stay {
        info!("Running; press Ctrl+C to stop");
        let mut rx = shutdown.subscribe();
        let _ = rx.recv().await;
    }

    if let Some(warning) = started.warning {
        if !shutdown.is_shutting_down().await {
            shutdown.shutdown().await;
        }
        warning.join().await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;

    init_logging_with_config(settings.logging.to_log_config())?;
    init_metrics();

    match args.command {
        Command::Run { world, stay } => run(&world, stay, settings).await?,
        Command::Connect { world, player } => {
            let (catalog, mut orchestrator) = open_world(&world, &settings)?;
            let outcome = orchestrator.on_player_connect(&PlayerId::new(player))?;
            save_world(&world, catalog, &orchestrator)?;
            info!(
                player = %outcome.player,
                tier = %outcome.tier,
                added = outcome.added,
                total = outcome.total,
                "Player connected"
            );
        }
        Command::Reset { world, player, as_player } => {
            let (catalog, mut orchestrator) = open_world(&world, &settings)?;
            let caller = as_player.map_or(Caller::Console, |id| Caller::Player(PlayerId::new(id)));
            let reply = orchestrator.run_command(&caller, &["reset".to_string(), player])?;
            save_world(&world, catalog, &orchestrator)?;
            info!("{}", reply);
        }
        Command::ShowConfig => {
            let load = PluginConfig::load(&settings.plugin_config);
            info!(path = %settings.plugin_config.display(), source = ?load.source, "Plugin config");
            println!("{}", serde_json::to_string_pretty(&load.config)?);
        }
    }

    Ok(())
}
