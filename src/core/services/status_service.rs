use crate::config::local_store::LocalStore;
use crate::core::errors::Result;
use crate::core::models::snapshot::ConfigSnapshot;
use crate::core::traits::keyring::Keyring;
use crate::core::traits::signing_config::SigningConfig;

/// Assembles the consolidated status snapshot from live state.
///
/// The flags gate each other: when the key tool is missing nothing else is
/// probed, and without a key the Git and GitHub checks are skipped entirely.
pub struct StatusService<'a, K: Keyring, G: SigningConfig> {
    pub keyring: &'a K,
    pub git: &'a G,
    pub store: &'a LocalStore,
}

impl<'a, K: Keyring, G: SigningConfig> StatusService<'a, K, G> {
    pub fn snapshot(&self) -> Result<ConfigSnapshot> {
        let mut snapshot = ConfigSnapshot {
            gpg_installed: self.keyring.is_installed(),
            ..ConfigSnapshot::default()
        };
        if !snapshot.gpg_installed {
            return Ok(snapshot);
        }

        let keys = self.keyring.list_keys()?;
        let Some(key) = keys.into_iter().next() else {
            return Ok(snapshot);
        };
        snapshot.key_configured = true;

        let signing_key = self.git.current_signing_key()?;
        snapshot.git_configured = !signing_key.is_empty() && signing_key == key.key_id;

        // The GitHub sub-check must never fail the snapshot; its error is
        // carried alongside instead.
        match self.keyring.export_public_key(&key.key_id) {
            Ok(armored) => snapshot.public_key_armor = armored,
            Err(e) => snapshot.github_check_error = Some(e.to_string()),
        }

        // The persisted record is the source of truth for the GitHub flag
        // regardless of whether the export above succeeded.
        let cached = self.store.load();
        snapshot.github_key_added = cached.github_key_added;
        snapshot.github_configured = cached.github_key_added;
        snapshot.last_update =
            (!cached.last_config_update.is_empty()).then_some(cached.last_config_update);

        snapshot.key_details = Some(key);
        Ok(snapshot)
    }
}
