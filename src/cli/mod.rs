pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage GPG signing keys and wire them into Git and GitHub.
#[derive(Parser, Debug)]
#[command(name = "signet", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the Signet config document (default: ~/.signet)
    #[arg(long, global = true, env = "SIGNET_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new GPG key and configure Git to sign with it
    Create {
        /// Real name for the key's user id
        #[arg(long)]
        name: Option<String>,
        /// Email for the key's user id
        #[arg(long)]
        email: Option<String>,
        /// Optional comment for the key's user id
        #[arg(long)]
        comment: Option<String>,
        /// Expiration: 0 (never), or e.g. 30, 2w, 6m, 1y
        #[arg(long)]
        expire: Option<String>,
    },

    /// List secret keys and their Git configuration state
    List,

    /// Print the ASCII-armored public key
    Export {
        /// Key id to export (prompted when omitted)
        #[arg(short, long)]
        key_id: Option<String>,
    },

    /// Delete a key and clear the signing configuration
    Delete {
        /// Key id to delete (prompted when omitted)
        #[arg(short, long)]
        key_id: Option<String>,
    },

    /// Configure Git commit signing with an existing key
    Git {
        /// Key id to sign with (prompted when omitted)
        #[arg(short, long)]
        key_id: Option<String>,
    },

    /// Check for / upload the key on your GitHub account
    Github {
        /// Key id to connect (prompted when omitted)
        #[arg(short, long)]
        key_id: Option<String>,
    },

    /// Show the consolidated configuration status
    Status,

    /// Clear Git signing settings and the local config
    Clear,
}
