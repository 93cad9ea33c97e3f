use std::path::Path;

use crate::adapters::console::console_prompter::ConsolePrompter;
use crate::adapters::git::git_config::GitConfigBackend;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::{context, output};
use crate::core::errors::{Result, SignetError};
use crate::core::traits::keyring::{Keyring, NewKeyParams};
use crate::core::traits::signing_config::SigningConfig;

/// Execute `signet create`.
///
/// Generates a 4096-bit RSA key pair (with an RSA encryption subkey),
/// configures Git to sign commits with it, and records the result.
pub fn execute(
    config_dir: Option<&Path>,
    name: Option<&str>,
    email: Option<&str>,
    comment: Option<&str>,
    expire: Option<&str>,
) -> Result<()> {
    let keyring = GpgBackend::new();
    context::ensure_gpg_installed(&keyring)?;

    let git = GitConfigBackend::new();
    let store = context::store_at(config_dir);
    let mut prompter = ConsolePrompter;

    let params = gather_params(&mut prompter, name, email, comment, expire)?;

    output::header("Creating key");
    println!("  This can take a moment while entropy is gathered...");
    let key_id = keyring.create_key(&params)?;
    output::success(&format!("Created key {key_id}"));

    git.configure(&key_id)?;
    output::success("Git signing configured (user.signingkey, commit.gpgsign)");

    let now = chrono::Utc::now().to_rfc3339();
    store.update(|c| {
        c.gpg_key_id = key_id.clone();
        c.git_configured = true;
        c.git_email = params.email.clone();
        c.key_creation_time = now;
    })?;

    println!("\n  Sign a commit with: git commit -S -m \"your message\"");
    Ok(())
}

/// Fill in any parameter not given on the command line interactively.
fn gather_params(
    prompter: &mut ConsolePrompter,
    name: Option<&str>,
    email: Option<&str>,
    comment: Option<&str>,
    expire: Option<&str>,
) -> Result<NewKeyParams> {
    use crate::core::traits::prompter::Prompter;

    let name = match name {
        Some(n) => n.to_string(),
        None => prompter.prompt_text("Name for the key: ")?,
    };
    if name.is_empty() {
        return Err(SignetError::KeyCreation {
            reason: "a name is required".into(),
        });
    }

    let email = match email {
        Some(e) => e.to_string(),
        None => prompter.prompt_text("Email for the key: ")?,
    };
    if email.is_empty() {
        return Err(SignetError::KeyCreation {
            reason: "an email is required".into(),
        });
    }

    let comment = match comment {
        Some(c) => c.to_string(),
        None => prompter.prompt_text("Comment (optional): ")?,
    };

    let expire = match expire {
        Some(e) => e.to_string(),
        None => {
            let answer = prompter.prompt_text("Expiration (0 = never, e.g. 30, 6m, 1y) [0]: ")?;
            if answer.is_empty() {
                "0".to_string()
            } else {
                answer
            }
        }
    };
    GpgBackend::validate_expire_spec(&expire)?;

    Ok(NewKeyParams {
        name,
        email,
        comment,
        expire,
    })
}
