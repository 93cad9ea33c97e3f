use std::path::PathBuf;
use std::time::Duration;

/// All domain errors for Signet.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum SignetError {
    #[error(
        "GPG is not installed or not on PATH\n\n  \
         Signet drives the system 'gpg' binary and cannot continue without it.\n\n  \
         Solutions:\n    \
         → Debian/Ubuntu: sudo apt install gnupg\n    \
         → macOS:         brew install gnupg\n    \
         → Windows:       https://gpg4win.org"
    )]
    GpgNotInstalled,

    #[error("Key creation failed: {reason}")]
    KeyCreation { reason: String },

    #[error(
        "Invalid expiration '{spec}'\n\n  \
         Accepted values: 0 (never expires), or a number with an optional\n  \
         unit suffix: 30 (days), 2w (weeks), 6m (months), 1y (years)."
    )]
    InvalidExpireSpec { spec: String },

    #[error("Failed to export public key '{key_id}': {reason}")]
    Export { key_id: String, reason: String },

    #[error(
        "No secret key found for '{key_id}'\n\n  \
         Deletion requires the secret key to be present so the fingerprint\n  \
         can be resolved unambiguously.\n  \
         Run 'signet list' to see the keys Signet can manage."
    )]
    FingerprintNotFound { key_id: String },

    #[error("Key deletion failed: {reason}")]
    Deletion { reason: String },

    #[error(
        "Key '{key_id}' not found\n\n  \
         Run 'signet list' to see the available key ids."
    )]
    KeyNotFound { key_id: String },

    #[error(
        "No GPG keys found\n\n  \
         Create one first: signet create --name \"Your Name\" --email you@example.com"
    )]
    NoKeys,

    #[error("Git configuration failed: {detail}")]
    GitConfig { detail: String },

    #[error("{tool} invocation failed: {reason}")]
    ToolInvocation { tool: String, reason: String },

    #[error(
        "{tool} did not respond within {}s and was terminated\n\n  \
         A stuck pinentry or agent is the usual cause.\n  \
         Try 'gpgconf --kill gpg-agent' and run the command again.",
        .timeout.as_secs()
    )]
    Timeout { tool: String, timeout: Duration },

    #[error("GitHub request failed: {reason}")]
    Network { reason: String },

    #[error(
        "GitHub rejected the token (401 Unauthorized)\n\n  \
         The personal access token is invalid or expired.\n  \
         Create a new one at https://github.com/settings/tokens"
    )]
    InvalidToken,

    #[error(
        "GitHub token is missing the {scope} scope (403 Forbidden)\n\n  \
         Required scopes: read:gpg_key (mandatory), write:gpg_key (for uploads).\n  \
         Edit the token at https://github.com/settings/tokens"
    )]
    InsufficientScope { scope: TokenScope },

    #[error(
        "A GitHub username is required\n\n  \
         Set it once with: git config --global github.user <name>"
    )]
    UsernameRequired,

    #[error("GitHub key upload failed (HTTP {status}): {message}")]
    Upload { status: u16, message: String },

    #[error(
        "Failed to save configuration to {}: {reason}\n\n  \
         Check that the directory is writable.",
        .path.display()
    )]
    ConfigSave { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Which GitHub token scope a 403 pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    Read,
    Write,
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenScope::Read => write!(f, "read:gpg_key"),
            TokenScope::Write => write!(f, "write:gpg_key"),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SignetError>;
