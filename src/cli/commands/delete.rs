use std::path::Path;

use crate::adapters::console::console_prompter::ConsolePrompter;
use crate::adapters::git::git_config::GitConfigBackend;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::traits::keyring::Keyring;

/// Execute `signet delete`.
///
/// Resolves the id to a full fingerprint (secret material required), deletes
/// both secret and public key, then clears the Git signing settings and the
/// local config.
pub fn execute(config_dir: Option<&Path>, key_id: Option<&str>) -> Result<()> {
    let keyring = GpgBackend::new();
    context::ensure_gpg_installed(&keyring)?;

    let mut prompter = ConsolePrompter;
    let key_id = context::resolve_key_id(&keyring, &mut prompter, key_id)?;

    keyring.delete_key(&key_id)?;
    output::success(&format!("Deleted key {key_id}"));

    let git = GitConfigBackend::new();
    let store = context::store_at(config_dir);
    store.clear(&git)?;
    output::success("Signing configuration cleared");
    Ok(())
}
