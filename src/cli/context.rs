use std::path::Path;

use crate::config::local_store::LocalStore;
use crate::core::errors::{Result, SignetError};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::keyring::Keyring;
use crate::core::traits::prompter::Prompter;

/// Build the local store at the requested or default location.
pub fn store_at(config_dir: Option<&Path>) -> LocalStore {
    LocalStore::new(
        config_dir
            .map(|p| p.to_path_buf())
            .unwrap_or_else(LocalStore::default_dir),
    )
}

/// Upfront gate: every key-touching command aborts when gpg is missing.
pub fn ensure_gpg_installed(keyring: &impl Keyring) -> Result<()> {
    if keyring.is_installed() {
        Ok(())
    } else {
        Err(SignetError::GpgNotInstalled)
    }
}

/// Resolve which key an operation targets.
///
/// An explicit id wins. Otherwise a single existing key is used as is, and
/// with several keys the listing is shown and the user picks one.
pub fn resolve_key_id(
    keyring: &impl Keyring,
    prompter: &mut impl Prompter,
    explicit: Option<&str>,
) -> Result<String> {
    if let Some(id) = explicit {
        return Ok(id.to_string());
    }

    let keys = keyring.list_keys()?;
    match keys.as_slice() {
        [] => Err(SignetError::NoKeys),
        [only] => Ok(only.key_id.clone()),
        many => {
            println!("\nAvailable keys:");
            for key in many {
                println!("  {}  {}", key.key_id, describe_key(key));
            }
            let id = prompter.prompt_text("\nKey id to use: ")?;
            if id.is_empty() {
                return Err(SignetError::NoKeys);
            }
            Ok(id)
        }
    }
}

/// One listing line for a key, used by `status` and the selection prompt.
pub fn describe_key(key: &KeyRecord) -> String {
    let expires = key
        .expires
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".into());
    format!(
        "{} {}/{} expires: {expires}",
        key.uid, key.algorithm, key.size
    )
}
