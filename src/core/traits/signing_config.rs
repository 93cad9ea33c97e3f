use crate::core::errors::Result;

/// Port over the global Git signing configuration.
pub trait SigningConfig {
    /// Set `user.signingkey` and enable `commit.gpgsign`.
    ///
    /// Not atomic: if enabling signing fails after the key was set, the key
    /// setting remains.
    fn configure(&self, key_id: &str) -> Result<()>;

    /// Current `user.signingkey`; empty string when unset.
    fn current_signing_key(&self) -> Result<String>;

    /// Unset `user.signingkey`, `commit.gpgsign` and `tag.gpgsign`.
    /// Unsetting an absent value is not an error.
    fn clear_signing(&self) -> Result<()>;

    /// Read an arbitrary global value; empty string when unset.
    fn get(&self, key: &str) -> Result<String>;
}
