//! Crate-level error type

use crate::command::CommandError;
use crate::config::ConfigError;
use crate::gateway::GatewayError;
use thiserror::Error;

pub type GrantResult<T> = Result<T, GrantError>;

#[derive(Error, Debug)]
pub enum GrantError {
    /// A host collaborator failed mid-operation; nothing is retried
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}
