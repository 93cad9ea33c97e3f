use serde::{Deserialize, Serialize};

/// One entry from `GET /user/gpg_keys` or `GET /users/{username}/gpg_keys`.
///
/// Only the fields Signet consumes are modeled; the API returns more.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubGpgKey {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub fingerprint: String,
}

impl GithubGpgKey {
    /// Case-insensitive fingerprint comparison; GitHub and gpg do not agree
    /// on hex casing.
    pub fn matches_fingerprint(&self, fingerprint: &str) -> bool {
        !fingerprint.is_empty() && self.fingerprint.eq_ignore_ascii_case(fingerprint)
    }
}

/// Body for `POST /user/gpg_keys`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGpgKey {
    pub armored_public_key: String,
    pub title: String,
}

/// Error body GitHub returns for failed uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubApiError {
    #[serde(default)]
    pub message: String,
}
