use colored::Colorize;

use crate::adapters::git::git_config::GitConfigBackend;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::{context, output};
use crate::core::errors::Result;
use crate::core::traits::keyring::Keyring;
use crate::core::traits::signing_config::SigningConfig;

/// Execute `signet list`: all secret keys, marking the one Git signs with.
pub fn execute() -> Result<()> {
    let keyring = GpgBackend::new();
    context::ensure_gpg_installed(&keyring)?;

    let keys = keyring.list_keys()?;
    if keys.is_empty() {
        output::warning("No GPG keys found");
        println!("  Create one with 'signet create'.");
        return Ok(());
    }

    let git = GitConfigBackend::new();
    let signing_key = git.current_signing_key()?;
    let git_email = git.get("user.email")?;

    output::header(&format!("Keys ({})", keys.len()));
    for key in &keys {
        let configured = key.key_id == signing_key;
        let marker = if configured {
            "✓".green()
        } else {
            "✗".yellow()
        };
        println!("\n  {marker} {}", key.uid.bold());
        println!("    Key id:  {}", key.key_id);
        println!("    Type:    {}/{} bits", key.algorithm, key.size);
        if let Some(created) = key.created {
            println!("    Created: {}", created.format("%Y-%m-%d"));
        }
        match key.expires {
            Some(expires) => println!("    Expires: {}", expires.format("%Y-%m-%d")),
            None => println!("    Expires: never"),
        }
        if let Some(subkey) = &key.subkey {
            println!(
                "    Subkey:  {} ({}/{} bits)",
                subkey.key_id, subkey.algorithm, subkey.size
            );
        }
        if configured {
            println!("    Git:     signing configured ({git_email})");
        }
    }
    Ok(())
}
