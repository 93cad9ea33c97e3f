use std::path::PathBuf;
use std::process::Command;

use crate::adapters::process::{self, DEFAULT_TIMEOUT};
use crate::core::errors::{Result, SignetError};
use crate::core::traits::signing_config::SigningConfig;

/// Git configuration backend operating on the global scope via the `git`
/// binary.
pub struct GitConfigBackend {
    git_path: PathBuf,
}

impl GitConfigBackend {
    pub fn new() -> Self {
        Self {
            git_path: PathBuf::from("git"),
        }
    }

    pub fn with_path(git_path: PathBuf) -> Self {
        Self { git_path }
    }

    fn run_git(&self, args: &[&str]) -> Result<process::ToolOutput> {
        let mut cmd = Command::new(&self.git_path);
        cmd.arg("config").arg("--global").args(args);
        process::run_with_timeout(cmd, "git", None, DEFAULT_TIMEOUT)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let out = self.run_git(&[key, value])?;
        if !out.success {
            return Err(SignetError::GitConfig {
                detail: format!("could not set {key}: {}", out.stderr_utf8()),
            });
        }
        Ok(())
    }

    /// Unset a value; an already-absent value is not an error.
    fn unset(&self, key: &str) -> Result<()> {
        // git exits 5 when the key is not present; that is fine here.
        let _ = self.run_git(&["--unset", key])?;
        Ok(())
    }
}

impl Default for GitConfigBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SigningConfig for GitConfigBackend {
    fn configure(&self, key_id: &str) -> Result<()> {
        self.set("user.signingkey", key_id)?;
        // Not rolled back if this second step fails; the signing key
        // setting alone is harmless.
        self.set("commit.gpgsign", "true")?;
        Ok(())
    }

    fn current_signing_key(&self) -> Result<String> {
        self.get("user.signingkey")
    }

    fn clear_signing(&self) -> Result<()> {
        self.unset("user.signingkey")?;
        self.unset("commit.gpgsign")?;
        self.unset("tag.gpgsign")?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<String> {
        let out = self.run_git(&["--get", key])?;
        if !out.success {
            // Unset values exit non-zero; report them as empty.
            return Ok(String::new());
        }
        Ok(out.stdout_utf8().trim().to_string())
    }
}
