use std::path::{Path, PathBuf};

use crate::core::errors::{Result, SignetError};
use crate::core::models::local_config::LocalConfig;
use crate::core::traits::signing_config::SigningConfig;

/// Persisted store: one human-readable JSON document per user.
///
/// The location is injected rather than hard-coded so tests can redirect it
/// to a temporary directory.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store rooted at `config_dir` (the document lives at
    /// `config_dir/config.json`).
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            path: config_dir.join("config.json"),
        }
    }

    /// Default per-user location: `~/.signet`.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".signet")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record. An absent or malformed file is an empty record,
    /// never an error.
    pub fn load(&self) -> LocalConfig {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Overwrite the whole record. Save failures are fatal, unlike loads.
    pub fn save(&self, config: &LocalConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SignetError::ConfigSave {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        }
        let json =
            serde_json::to_string_pretty(config).map_err(|e| SignetError::ConfigSave {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        std::fs::write(&self.path, json).map_err(|e| SignetError::ConfigSave {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Load, mutate, stamp and save in one whole-record write, so an
    /// interrupt never leaves a half-applied update on disk.
    pub fn update<F>(&self, mutate: F) -> Result<LocalConfig>
    where
        F: FnOnce(&mut LocalConfig),
    {
        let mut config = self.load();
        mutate(&mut config);
        config.touch();
        self.save(&config)?;
        Ok(config)
    }

    /// Clear everything: unset the Git signing settings, delete the
    /// document, drop the directory if it is now empty, then write back an
    /// explicit unconfigured record through the normal save path.
    pub fn clear(&self, git: &dyn SigningConfig) -> Result<()> {
        git.clear_signing()?;

        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        if let Some(parent) = self.path.parent() {
            // Fails when other files remain, which is fine.
            let _ = std::fs::remove_dir(parent);
        }

        self.save(&LocalConfig::default())
    }
}
