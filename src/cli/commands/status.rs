use std::path::Path;

use colored::Colorize;

use crate::adapters::git::git_config::GitConfigBackend;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::services::status_service::StatusService;

/// Execute `signet status`: the consolidated configuration snapshot.
pub fn execute(config_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let keyring = GpgBackend::new();
    let git = GitConfigBackend::new();
    let store = context::store_at(config_dir);

    let snapshot = StatusService {
        keyring: &keyring,
        git: &git,
        store: &store,
    }
    .snapshot()?;

    output::header("Configuration status");
    output::flag("gpg_installed", snapshot.gpg_installed);
    output::flag("key_configured", snapshot.key_configured);
    output::flag("git_configured", snapshot.git_configured);
    output::flag("github_configured", snapshot.github_configured);

    if !snapshot.gpg_installed {
        println!("\n  Install GPG first; nothing else can be checked without it.");
        return Ok(());
    }

    match &snapshot.key_details {
        Some(key) => {
            output::header("Active key");
            println!("  {}", context::describe_key(key));
            println!("  Key id: {}", key.key_id);
            if let Some(subkey) = &key.subkey {
                println!(
                    "  Subkey: {} ({}/{} bits)",
                    subkey.key_id, subkey.algorithm, subkey.size
                );
            }
        }
        None => {
            println!("\n  No keys yet — run 'signet create'.");
            return Ok(());
        }
    }

    if let Some(err) = &snapshot.github_check_error {
        output::warning(&format!("GitHub sub-check failed: {err}"));
    } else if verbose && !snapshot.public_key_armor.is_empty() {
        output::header("Public key");
        println!("{}", snapshot.public_key_armor);
    }

    output::header("GitHub");
    output::flag("github_key_added", snapshot.github_key_added);
    match &snapshot.last_update {
        Some(last) => println!("  last_update: {}", last.cyan()),
        None => println!("  last_update: {}", "never".yellow()),
    }
    Ok(())
}
