use std::path::PathBuf;
use std::process::Command;

use crate::adapters::gpg::colon_parser;
use crate::adapters::process::{self, DEFAULT_TIMEOUT, KEYGEN_TIMEOUT};
use crate::core::errors::{Result, SignetError};
use crate::core::models::key_record::KeyRecord;
use crate::core::traits::keyring::{Keyring, NewKeyParams};

/// Key-tool backend that shells out to the system `gpg` binary.
///
/// Every call is synchronous and bounded by a conservative timeout so a
/// stuck agent or pinentry cannot hang the process indefinitely.
pub struct GpgBackend {
    /// Path to the gpg binary (defaults to "gpg").
    gpg_path: PathBuf,
}

impl GpgBackend {
    /// Create a new backend using the default `gpg` binary.
    pub fn new() -> Self {
        Self {
            gpg_path: PathBuf::from("gpg"),
        }
    }

    /// Create a new backend with a custom gpg binary path.
    pub fn with_path(gpg_path: PathBuf) -> Self {
        Self { gpg_path }
    }

    /// Run gpg and return captured output; non-zero exit is left to callers.
    fn run_gpg(
        &self,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<process::ToolOutput> {
        let mut cmd = Command::new(&self.gpg_path);
        cmd.args(args);
        process::run_with_timeout(cmd, "gpg", None, timeout)
    }

    /// Validate the native relative expiration syntax: "0", "30", "2w",
    /// "6m", "1y".
    pub fn validate_expire_spec(spec: &str) -> Result<()> {
        // Unwrap is safe: the pattern is a compile-time constant.
        let pattern = regex::Regex::new(r"^(0|[0-9]+[dwmy]?)$").expect("valid regex");
        if pattern.is_match(spec) {
            Ok(())
        } else {
            Err(SignetError::InvalidExpireSpec { spec: spec.into() })
        }
    }

    /// Render the unattended generation spec for `--gen-key`.
    fn batch_spec(params: &NewKeyParams) -> String {
        let mut spec = String::new();
        spec.push_str("Key-Type: RSA\n");
        spec.push_str("Key-Length: 4096\n");
        spec.push_str("Subkey-Type: RSA\n");
        spec.push_str("Subkey-Length: 4096\n");
        spec.push_str(&format!("Name-Real: {}\n", params.name));
        spec.push_str(&format!("Name-Email: {}\n", params.email));
        if !params.comment.is_empty() {
            spec.push_str(&format!("Name-Comment: {}\n", params.comment));
        }
        spec.push_str(&format!("Expire-Date: {}\n", params.expire));
        spec.push_str("%no-protection\n");
        spec.push_str("%commit\n");
        spec
    }
}

impl Default for GpgBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyring for GpgBackend {
    fn is_installed(&self) -> bool {
        self.run_gpg(&["--version"], DEFAULT_TIMEOUT)
            .map(|o| o.success)
            .unwrap_or(false)
    }

    fn create_key(&self, params: &NewKeyParams) -> Result<String> {
        Self::validate_expire_spec(&params.expire)?;

        // With no file argument gpg reads the generation spec from stdin,
        // which keeps the passphrase-less spec off the filesystem.
        let mut cmd = Command::new(&self.gpg_path);
        cmd.args(["--batch", "--pinentry-mode", "loopback", "--gen-key"]);
        let out = process::run_with_timeout(
            cmd,
            "gpg",
            Some(Self::batch_spec(params).as_bytes()),
            KEYGEN_TIMEOUT,
        )?;
        if !out.success {
            return Err(SignetError::KeyCreation {
                reason: out.stderr_utf8(),
            });
        }

        // The newest key is the first secret record in the fresh listing.
        self.list_keys()?
            .first()
            .map(|k| k.key_id.clone())
            .ok_or_else(|| SignetError::KeyCreation {
                reason: "no secret key found after generation".into(),
            })
    }

    fn list_keys(&self) -> Result<Vec<KeyRecord>> {
        let out = self.run_gpg(&["--list-secret-keys", "--with-colons"], DEFAULT_TIMEOUT)?;
        if !out.success {
            return Err(SignetError::ToolInvocation {
                tool: "gpg".into(),
                reason: out.stderr_utf8(),
            });
        }
        Ok(colon_parser::parse_key_listing(&out.stdout_utf8()))
    }

    fn key_details(&self, key_id: &str) -> Result<Option<KeyRecord>> {
        let out = self.run_gpg(
            &["--list-secret-keys", "--with-colons", key_id],
            DEFAULT_TIMEOUT,
        )?;
        // gpg exits non-zero for an unknown id; that is "not found", not
        // a failure.
        if !out.success {
            return Ok(None);
        }
        Ok(colon_parser::parse_key_listing(&out.stdout_utf8())
            .into_iter()
            .next())
    }

    fn export_public_key(&self, key_id: &str) -> Result<String> {
        let out = self.run_gpg(
            &["--armor", "--export", "--batch", key_id],
            DEFAULT_TIMEOUT,
        )?;
        if !out.success {
            return Err(SignetError::Export {
                key_id: key_id.into(),
                reason: out.stderr_utf8(),
            });
        }
        let armored = out.stdout_utf8().trim().to_string();
        // gpg exports nothing (exit 0) for unknown ids.
        if armored.is_empty() {
            return Err(SignetError::Export {
                key_id: key_id.into(),
                reason: "no key material exported".into(),
            });
        }
        Ok(armored)
    }

    fn fingerprint(&self, key_id: &str) -> Result<String> {
        let out = self.run_gpg(
            &["--with-colons", "--fingerprint", key_id],
            DEFAULT_TIMEOUT,
        )?;
        if !out.success {
            return Ok(String::new());
        }
        Ok(colon_parser::first_fingerprint(&out.stdout_utf8()))
    }

    fn delete_key(&self, key_id: &str) -> Result<()> {
        // Resolve via the secret listing so an id that only matches public
        // material cannot select an unexpected fingerprint.
        let out = self.run_gpg(
            &["--list-secret-keys", "--with-colons", key_id],
            DEFAULT_TIMEOUT,
        )?;
        let fingerprint = if out.success {
            colon_parser::first_fingerprint(&out.stdout_utf8())
        } else {
            String::new()
        };
        if fingerprint.is_empty() {
            return Err(SignetError::FingerprintNotFound {
                key_id: key_id.into(),
            });
        }

        let out = self.run_gpg(
            &[
                "--batch",
                "--yes",
                "--delete-secret-and-public-key",
                &fingerprint,
            ],
            DEFAULT_TIMEOUT,
        )?;
        if !out.success {
            return Err(SignetError::Deletion {
                reason: out.stderr_utf8(),
            });
        }
        Ok(())
    }
}
