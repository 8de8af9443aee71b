//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the locker binary.

mod account;
mod commands;
mod media;

pub use commands::{Cli, Commands, LockerCommands};

use locker::{Locker, LockerConfig, LockerResult};
use std::path::Path;

/// Load configuration from `--config`, or the layered sources without it.
pub fn load_config(path: Option<&Path>) -> LockerResult<LockerConfig> {
    match path {
        Some(path) => LockerConfig::from_file(path),
        None => LockerConfig::load(),
    }
}

/// Run a command that does not need a locker.
///
/// Returns the locker command when one was given.
pub fn run_offline(command: Commands) -> LockerResult<Option<LockerCommands>> {
    match command {
        Commands::HashPassword { password, verify } => {
            account::hash_password(&password, verify.as_deref())?;
            Ok(None)
        }
        Commands::Locker(command) => Ok(Some(command)),
    }
}

/// Run a command against an open locker.
pub async fn run(locker: &Locker, command: LockerCommands) -> LockerResult<()> {
    match command {
        LockerCommands::Upload {
            path,
            uploaded_by,
            name,
        } => media::upload(locker, &path, &uploaded_by, name.as_deref()).await,

        LockerCommands::List { format } => media::list(locker, format).await,

        LockerCommands::Delete { index } => media::delete(locker, index).await,

        LockerCommands::Rename { index, new_name } => {
            media::rename(locker, index, &new_name).await
        }

        LockerCommands::Hash { index, set } => {
            media::hash(locker, index, set.as_deref()).await
        }

        LockerCommands::View { viewer, index } => media::view(locker, &viewer, index).await,

        LockerCommands::Interact { first, second } => {
            account::interact(locker, &first, &second).await
        }

        LockerCommands::CanMessage { first, second } => {
            account::can_message(locker, &first, &second).await
        }
    }
}
