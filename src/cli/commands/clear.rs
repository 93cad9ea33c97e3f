use std::path::Path;

use crate::adapters::git::git_config::GitConfigBackend;
use crate::cli::{context, output};
use crate::core::errors::Result;

/// Execute `signet clear`: unset the Git signing settings and reset the
/// local config to an explicit unconfigured record. Keys are not touched.
pub fn execute(config_dir: Option<&Path>) -> Result<()> {
    let git = GitConfigBackend::new();
    context::store_at(config_dir).clear(&git)?;
    output::success("Configuration cleared");
    println!("  Keys were left untouched; use 'signet delete' to remove them.");
    Ok(())
}
