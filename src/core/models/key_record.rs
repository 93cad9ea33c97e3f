use chrono::{DateTime, Utc};

/// A key as reported by the key tool's machine-readable listing.
///
/// Parsed fresh on every listing; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Long key id (16 hex characters).
    pub key_id: String,
    /// Public-key algorithm, e.g. "RSA" or "EdDSA".
    pub algorithm: String,
    /// Key size in bits.
    pub size: u32,
    pub created: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    /// Primary user id ("Name (comment) <email>").
    pub uid: String,
    /// First encryption subkey, when present.
    pub subkey: Option<SubkeyRecord>,
    /// Full fingerprint, when the listing included fingerprint lines.
    pub fingerprint: Option<String>,
}

/// Subkey details attached to a [`KeyRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubkeyRecord {
    pub key_id: String,
    pub algorithm: String,
    pub size: u32,
    pub created: Option<DateTime<Utc>>,
}

impl KeyRecord {
    /// Owner name extracted from the uid, without the email/comment parts.
    pub fn owner(&self) -> &str {
        self.uid
            .split('<')
            .next()
            .map(str::trim)
            .unwrap_or(&self.uid)
    }

    /// Email extracted from the uid, if present.
    pub fn email(&self) -> Option<&str> {
        let start = self.uid.find('<')? + 1;
        let end = self.uid.find('>')?;
        (start < end).then(|| &self.uid[start..end])
    }
}
