use crate::core::errors::Result;
use crate::core::models::key_record::KeyRecord;

/// Parameters for unattended key generation.
#[derive(Debug, Clone)]
pub struct NewKeyParams {
    pub name: String,
    pub email: String,
    /// Empty means no comment field.
    pub comment: String,
    /// Native relative syntax: "0" (never), "30", "2w", "6m", "1y".
    pub expire: String,
}

/// Port over the system key tool.
pub trait Keyring {
    /// Whether the key tool is installed and answers a version query.
    fn is_installed(&self) -> bool;

    /// Generate a new key pair unattended; returns the new long key id.
    fn create_key(&self, params: &NewKeyParams) -> Result<String>;

    /// All secret keys, in listing order. No keys is an empty vec, not an error.
    fn list_keys(&self) -> Result<Vec<KeyRecord>>;

    /// Details for one key id; `None` when the key does not exist.
    fn key_details(&self, key_id: &str) -> Result<Option<KeyRecord>>;

    /// ASCII-armored public key material.
    fn export_public_key(&self, key_id: &str) -> Result<String>;

    /// Full fingerprint for a key id; empty string when not found.
    fn fingerprint(&self, key_id: &str) -> Result<String>;

    /// Delete secret and public material. Resolves the id to a fingerprint
    /// first and refuses ids without secret material.
    fn delete_key(&self, key_id: &str) -> Result<()>;
}
