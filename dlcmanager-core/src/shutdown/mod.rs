//! Shutdown coordination for background tasks

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

/// Shutdown signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Graceful,
    Immediate,
}

/// Shutdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    Running,
    ShuttingDown,
    Shutdown,
}

/// Broadcasts a single shutdown to every subscribed task
#[derive(Debug)]
pub struct ShutdownCoordinator {
    state: Arc<RwLock<ShutdownState>>,
    shutdown_tx: broadcast::Sender<ShutdownSignal>,
    grace: Duration,
}

impl ShutdownCoordinator {
    /// `grace` is how long [`shutdown`](Self::shutdown) waits for tasks to wind down
    pub fn new(grace: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(16);

        Self {
            state: Arc::new(RwLock::new(ShutdownState::Running)),
            shutdown_tx,
            grace,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShutdownSignal> {
        self.shutdown_tx.subscribe()
    }

    /// Signal tasks, wait out the grace period, then mark shutdown complete
    pub async fn shutdown(&self) {
        let mut state = self.state.write().await;
        if *state != ShutdownState::Running {
            warn!("Shutdown already in progress");
            return;
        }

        info!("Initiating graceful shutdown");
        *state = ShutdownState::ShuttingDown;
        drop(state);

        // No receivers just means nothing is running in the background.
        if self.shutdown_tx.send(ShutdownSignal::Graceful).is_err() {
            debug!("No background tasks to stop");
        }

        tokio::time::sleep(self.grace).await;

        *self.state.write().await = ShutdownState::Shutdown;
        info!("Shutdown complete");
    }

    pub async fn shutdown_immediately(&self) {
        warn!("Initiating immediate shutdown");

        *self.state.write().await = ShutdownState::Shutdown;

        if self.shutdown_tx.send(ShutdownSignal::Immediate).is_err() {
            debug!("No background tasks to stop");
        }
    }

    pub async fn is_shutting_down(&self) -> bool {
        *self.state.read().await != ShutdownState::Running
    }

    pub async fn state(&self) -> ShutdownState {
        *self.state.read().await
    }
}

/// Runs one named background task until it finishes or shutdown is signalled
#[derive(Debug)]
pub struct ShutdownHandler {
    component_name: String,
    shutdown_rx: broadcast::Receiver<ShutdownSignal>,
}

impl ShutdownHandler {
    /// Subscribes immediately, so a signal sent before [`run`](Self::run) is
    /// polled is still observed.
    pub fn new(coordinator: &ShutdownCoordinator, component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            shutdown_rx: coordinator.subscribe(),
        }
    }

    pub async fn run<F, Fut>(mut self, f: F)
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        debug!("Starting component: {}", self.component_name);

        tokio::select! {
            _ = f() => {
                debug!("Component {} completed normally", self.component_name);
            }
            signal = self.shutdown_rx.recv() => {
                match signal {
                    Ok(ShutdownSignal::Graceful) => {
                        debug!("Component {} received graceful shutdown signal", self.component_name);
                    }
                    Ok(ShutdownSignal::Immediate) => {
                        warn!("Component {} received immediate shutdown signal", self.component_name);
                    }
                    Err(e) => {
                        error!("Component {} shutdown channel error: {}", self.component_name, e);
                    }
                }
            }
        }
    }
}

/// Trigger a graceful shutdown on SIGINT or SIGTERM
#[cfg(unix)]
pub fn install_signal_handlers(coordinator: Arc<ShutdownCoordinator>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM"),
            _ = sigint.recv() => info!("Received SIGINT"),
        }
        coordinator.shutdown().await;
    });

    Ok(())
}

/// Trigger a graceful shutdown on Ctrl+C
#[cfg(windows)]
pub fn install_signal_handlers(coordinator: Arc<ShutdownCoordinator>) -> std::io::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C");
                coordinator.shutdown().await;
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    Ok(())
}
