//! The `dlcmanager` console command
//!
//! ```text
//! dlcmanager reset <player id>
//! ```
//!
//! The server console may always run it; players need `dlcmanager.admin`.

use crate::catalog::PlayerId;
use std::fmt;
use thiserror::Error;

pub const COMMAND_NAME: &str = "dlcmanager";

pub const USAGE: &str = "Usage: dlcmanager reset <player id>";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: dlcmanager reset <player id>")]
    MissingAction,

    #[error("Unknown action '{0}'. Usage: dlcmanager reset <player id>")]
    UnknownAction(String),

    #[error("Missing player id. Usage: dlcmanager reset <player id>")]
    MissingTarget,

    #[error("{0} is not allowed to run dlcmanager")]
    PermissionDenied(String),
}

/// Who issued a console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// Server console or RCON
    Console,
    Player(PlayerId),
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caller::Console => f.write_str("server console"),
            Caller::Player(id) => write!(f, "player {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// Wipe every unlocked blueprint of `target`
    Reset { target: PlayerId },
}

impl AdminCommand {
    /// Parse the arguments following the command name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, CommandError> {
        let mut args = args.iter().map(|a| a.as_ref().trim()).filter(|a| !a.is_empty());

        let action = args.next().ok_or(CommandError::MissingAction)?;
        match action.to_lowercase().as_str() {
            "reset" => {
                let target = args.next().ok_or(CommandError::MissingTarget)?;
                Ok(AdminCommand::Reset {
                    target: PlayerId::from(target),
                })
            }
            other => Err(CommandError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reset() {
        let cmd = AdminCommand::parse(&["reset", "76561198000000001"]).unwrap();
        assert_eq!(
            cmd,
            AdminCommand::Reset {
                target: PlayerId::from("76561198000000001")
            }
        );

        let cmd = AdminCommand::parse(&["RESET", " 42 "]).unwrap();
        assert_eq!(cmd, AdminCommand::Reset { target: PlayerId::from("42") });
    }

    #[test]
    fn test_parse_errors() {
        let none: [&str; 0] = [];
        assert_eq!(AdminCommand::parse(&none), Err(CommandError::MissingAction));
        assert_eq!(AdminCommand::parse(&["reset"]), Err(CommandError::MissingTarget));
        assert_eq!(
            AdminCommand::parse(&["wipe", "1"]),
            Err(CommandError::UnknownAction("wipe".to_string()))
        );
    }

    #[test]
    fn test_error_messages_include_usage() {
        assert_eq!(CommandError::MissingAction.to_string(), USAGE);
        assert!(CommandError::MissingTarget.to_string().ends_with(USAGE));
        assert_eq!(
            CommandError::PermissionDenied(Caller::Player("5".into()).to_string()).to_string(),
            "player 5 is not allowed to run dlcmanager"
        );
    }
}
