//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Locker - personal media locker with content hashing and mutual-interaction messaging
#[derive(Parser, Debug)]
#[command(name = "locker")]
#[command(about = "Personal media locker with content hashing and mutual-interaction messaging", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to layered locker.toml lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Commands that operate on an open locker
    #[command(flatten)]
    Locker(LockerCommands),

    /// Grade a password and print its stored digest
    HashPassword {
        /// Password to hash
        password: String,

        /// Compare against a stored digest instead of printing one
        #[arg(long)]
        verify: Option<String>,
    },
}

/// Commands that need the media store or interaction graph
#[derive(Subcommand, Debug)]
pub enum LockerCommands {
    /// Store a file in the locker
    Upload {
        /// File to upload
        path: PathBuf,

        /// Uploader identity
        #[arg(long = "as", value_name = "USER")]
        uploaded_by: String,

        /// Display name (defaults to the file's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// List stored media in catalog order
    List {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Delete the item at an index
    Delete {
        /// Catalog index
        index: usize,
    },

    /// Rename the item at an index (the extension is kept if omitted)
    Rename {
        /// Catalog index
        index: usize,

        /// New display name
        new_name: String,
    },

    /// Show or overwrite the hash tag of the item at an index
    Hash {
        /// Catalog index
        index: usize,

        /// Replacement hash tag
        #[arg(long)]
        set: Option<String>,
    },

    /// Record that a user viewed the item at an index
    View {
        /// Viewer identity
        viewer: String,

        /// Catalog index
        index: usize,
    },

    /// Record that two users interacted
    Interact {
        /// First user
        first: String,

        /// Second user
        second: String,
    },

    /// Check whether two users may message each other
    CanMessage {
        /// First user
        first: String,

        /// Second user
        second: String,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
