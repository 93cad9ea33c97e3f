use crate::adapters::console::console_prompter::ConsolePrompter;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::context;
use crate::core::errors::Result;
use crate::core::traits::keyring::Keyring;

/// Execute `signet export`: print the armored public key, suitable for
/// pasting into a web form.
pub fn execute(key_id: Option<&str>) -> Result<()> {
    let keyring = GpgBackend::new();
    context::ensure_gpg_installed(&keyring)?;

    let mut prompter = ConsolePrompter;
    let key_id = context::resolve_key_id(&keyring, &mut prompter, key_id)?;

    println!("{}", keyring.export_public_key(&key_id)?);
    Ok(())
}
