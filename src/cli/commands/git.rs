use std::path::Path;

use crate::adapters::console::console_prompter::ConsolePrompter;
use crate::adapters::git::git_config::GitConfigBackend;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::{context, output};
use crate::core::errors::{Result, SignetError};
use crate::core::traits::keyring::Keyring;
use crate::core::traits::signing_config::SigningConfig;

/// Execute `signet git`: point Git commit signing at an existing key.
pub fn execute(config_dir: Option<&Path>, key_id: Option<&str>) -> Result<()> {
    let keyring = GpgBackend::new();
    context::ensure_gpg_installed(&keyring)?;

    let mut prompter = ConsolePrompter;
    let key_id = context::resolve_key_id(&keyring, &mut prompter, key_id)?;

    // Catch typos before touching the global Git config.
    if keyring.key_details(&key_id)?.is_none() {
        return Err(SignetError::KeyNotFound { key_id });
    }

    let git = GitConfigBackend::new();
    git.configure(&key_id)?;

    let email = git.get("user.email")?;
    context::store_at(config_dir).update(|c| {
        c.gpg_key_id = key_id.clone();
        c.git_configured = true;
        c.git_email = email.clone();
    })?;

    output::success(&format!("Git now signs commits with {key_id}"));
    println!("  Sign a commit with: git commit -S -m \"your message\"");
    Ok(())
}
