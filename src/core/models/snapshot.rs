use crate::core::models::key_record::KeyRecord;

/// Consolidated configuration status, assembled fresh on every request.
///
/// The flags form a gated chain: when `gpg_installed` is false nothing else
/// is probed, and when no key exists the Git and GitHub flags stay false.
#[derive(Debug, Clone, Default)]
pub struct ConfigSnapshot {
    pub gpg_installed: bool,
    pub key_configured: bool,
    pub git_configured: bool,
    pub github_configured: bool,
    pub key_details: Option<KeyRecord>,
    /// ASCII-armored public key of the active key, when exportable.
    pub public_key_armor: String,
    pub github_key_added: bool,
    /// RFC 3339 timestamp of the last persisted update, if any.
    pub last_update: Option<String>,
    /// Error text from the GitHub sub-check, which never fails the snapshot.
    pub github_check_error: Option<String>,
}
