use serde::{Deserialize, Serialize};

/// The persisted Signet record, one JSON document per user.
///
/// This is a cache of last-known state, not a source of truth: live Git and
/// GPG state always win where they can be probed. Fields that cannot be
/// re-derived (whether the key was added to GitHub) are authoritative here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default)]
    pub gpg_key_id: String,
    #[serde(default)]
    pub git_configured: bool,
    #[serde(default)]
    pub github_key_added: bool,
    /// RFC 3339 timestamp of the last write, empty when never configured.
    #[serde(default)]
    pub last_config_update: String,
    #[serde(default)]
    pub git_email: String,
    /// RFC 3339 timestamp recorded at key creation.
    #[serde(default)]
    pub key_creation_time: String,
}

impl LocalConfig {
    /// True when no field has ever been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Stamp `last_config_update` with the current time.
    pub fn touch(&mut self) {
        self.last_config_update = chrono::Utc::now().to_rfc3339();
    }
}
