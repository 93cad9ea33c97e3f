use std::time::Duration;

use crate::config::local_store::LocalStore;
use crate::core::errors::{Result, SignetError};
use crate::core::traits::github::GithubApi;
use crate::core::traits::keyring::Keyring;
use crate::core::traits::prompter::Prompter;

/// Tunable waits of the connect flow, injected so tests run instantly.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Wait after an upload before the one-shot re-check, to accommodate
    /// eventual visibility on GitHub's side.
    pub settle_delay: Duration,
    /// Bound on the "verify now?" confirmation prompt; expiry means skip.
    pub confirm_timeout: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(5),
            confirm_timeout: Duration::from_secs(30),
        }
    }
}

/// How a connect attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The fingerprint was already registered for the account.
    AlreadyPresent,
    /// Uploaded and confirmed visible by the re-check.
    Uploaded,
    /// Uploaded, but the re-check did not see it yet.
    UploadedUnverified,
    /// The user declined, or the confirmation prompt timed out.
    Skipped,
}

/// Orchestrates connecting a local key to a GitHub account.
///
/// The flow is a fixed sequence of suspension points: prompt for a token,
/// validate read scope, compare fingerprints, confirm with a bounded wait,
/// upload, settle, re-check once, persist. All I/O goes through the
/// injected ports so the sequence is testable with scripted fakes.
pub struct GithubConnectFlow<'a, K: Keyring, A: GithubApi, P: Prompter> {
    pub keyring: &'a K,
    pub api: &'a A,
    pub prompter: &'a mut P,
    pub store: &'a LocalStore,
    pub options: ConnectOptions,
}

impl<'a, K: Keyring, A: GithubApi, P: Prompter> GithubConnectFlow<'a, K, A, P> {
    /// Run the flow for `key_id`. `username` is used for the upload title;
    /// `wait` renders the settling delay (a countdown on a real console,
    /// a no-op in tests).
    pub fn run(
        &mut self,
        key_id: &str,
        username: &str,
        wait: impl Fn(Duration),
    ) -> Result<ConnectOutcome> {
        let token = self
            .prompter
            .prompt_text("GitHub personal access token (read:gpg_key, optionally write:gpg_key): ")?;
        if token.is_empty() {
            return Err(SignetError::InvalidToken);
        }

        // Validates read scope as a side effect; 401/403 surface here.
        let registered = self.api.list_keys(&token)?;

        let fingerprint = self.keyring.fingerprint(key_id)?;
        if registered
            .iter()
            .any(|k| k.matches_fingerprint(&fingerprint))
        {
            self.persist_added()?;
            return Ok(ConnectOutcome::AlreadyPresent);
        }

        let confirmed = self.prompter.prompt_yes_no(
            "Upload the key to your GitHub account now? [y/N]: ",
            self.options.confirm_timeout,
        )?;
        // A timed-out prompt is a skip, not an error.
        if confirmed != Some(true) {
            return Ok(ConnectOutcome::Skipped);
        }

        let armored = self.keyring.export_public_key(key_id)?;
        let short_id = key_id.get(..8).unwrap_or(key_id);
        let title = format!("GPG Key {short_id} - {username}");
        self.api.upload_key(&token, &armored, &title)?;

        // 201 means GitHub accepted the key; remember that even if the
        // re-check below races eventual visibility.
        self.persist_added()?;

        wait(self.options.settle_delay);

        // One-shot re-check through the public per-user listing, the same
        // view the rest of the world sees.
        let visible = self.api.user_keys(&token, username)?;
        if visible
            .iter()
            .any(|k| k.matches_fingerprint(&fingerprint) || k.key_id == key_id)
        {
            Ok(ConnectOutcome::Uploaded)
        } else {
            Ok(ConnectOutcome::UploadedUnverified)
        }
    }

    fn persist_added(&self) -> Result<()> {
        self.store.update(|c| c.github_key_added = true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::errors::TokenScope;
    use crate::core::models::github_key::GithubGpgKey;
    use crate::core::models::key_record::KeyRecord;
    use crate::core::traits::keyring::NewKeyParams;

    const FPR: &str = "AAAA1111BBBB2222CCCC3333DDDD4444EEEE5555";
    const KEY_ID: &str = "59ABCDEF01234567";

    struct FakeKeyring;

    impl Keyring for FakeKeyring {
        fn is_installed(&self) -> bool {
            true
        }
        fn create_key(&self, _params: &NewKeyParams) -> Result<String> {
            unimplemented!("not used by connect")
        }
        fn list_keys(&self) -> Result<Vec<KeyRecord>> {
            Ok(vec![])
        }
        fn key_details(&self, _key_id: &str) -> Result<Option<KeyRecord>> {
            Ok(None)
        }
        fn export_public_key(&self, _key_id: &str) -> Result<String> {
            Ok("-----BEGIN PGP PUBLIC KEY BLOCK-----\nabc\n-----END PGP PUBLIC KEY BLOCK-----".into())
        }
        fn fingerprint(&self, _key_id: &str) -> Result<String> {
            Ok(FPR.into())
        }
        fn delete_key(&self, _key_id: &str) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeApi {
        keys: RefCell<Vec<GithubGpgKey>>,
        read_scope_missing: bool,
        write_scope_missing: bool,
        uploads: RefCell<Vec<String>>,
        /// When set, uploaded keys do not show up in later listings.
        slow_propagation: bool,
    }

    impl GithubApi for FakeApi {
        fn list_keys(&self, _token: &str) -> Result<Vec<GithubGpgKey>> {
            if self.read_scope_missing {
                return Err(SignetError::InsufficientScope {
                    scope: TokenScope::Read,
                });
            }
            Ok(self.keys.borrow().clone())
        }
        fn user_keys(&self, token: &str, _username: &str) -> Result<Vec<GithubGpgKey>> {
            self.list_keys(token)
        }
        fn upload_key(&self, _token: &str, armored: &str, title: &str) -> Result<()> {
            if self.write_scope_missing {
                return Err(SignetError::InsufficientScope {
                    scope: TokenScope::Write,
                });
            }
            self.uploads.borrow_mut().push(title.into());
            assert!(armored.starts_with("-----BEGIN"));
            if !self.slow_propagation {
                self.keys.borrow_mut().push(GithubGpgKey {
                    id: 1,
                    key_id: KEY_ID.into(),
                    fingerprint: FPR.to_ascii_lowercase(),
                });
            }
            Ok(())
        }
    }

    /// Prompter answering from a script; `None` simulates a timeout.
    struct ScriptedPrompter {
        token: String,
        confirm: Option<bool>,
    }

    impl Prompter for ScriptedPrompter {
        fn prompt_text(&mut self, _prompt: &str) -> Result<String> {
            Ok(self.token.clone())
        }
        fn prompt_yes_no(&mut self, _prompt: &str, _timeout: Duration) -> Result<Option<bool>> {
            Ok(self.confirm)
        }
    }

    fn instant_options() -> ConnectOptions {
        ConnectOptions {
            settle_delay: Duration::ZERO,
            confirm_timeout: Duration::ZERO,
        }
    }

    fn run_flow(
        api: &FakeApi,
        prompter: &mut ScriptedPrompter,
        store: &LocalStore,
    ) -> Result<ConnectOutcome> {
        GithubConnectFlow {
            keyring: &FakeKeyring,
            api,
            prompter,
            store,
            options: instant_options(),
        }
        .run(KEY_ID, "jane", |_| {})
    }

    fn temp_store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(dir.path().join("signet"))
    }

    #[test]
    fn upload_and_verify_persists_key_added() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi::default();
        let mut prompter = ScriptedPrompter {
            token: "ghp_test".into(),
            confirm: Some(true),
        };

        let outcome = run_flow(&api, &mut prompter, &store).unwrap();
        assert_eq!(outcome, ConnectOutcome::Uploaded);

        let config = store.load();
        assert!(config.github_key_added);
        assert!(!config.last_config_update.is_empty());

        let uploads = api.uploads.borrow();
        assert_eq!(uploads.as_slice(), ["GPG Key 59ABCDEF - jane"]);
    }

    #[test]
    fn existing_fingerprint_skips_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi::default();
        // GitHub reports lowercase; the local tool reports uppercase.
        api.keys.borrow_mut().push(GithubGpgKey {
            id: 7,
            key_id: KEY_ID.into(),
            fingerprint: FPR.to_ascii_lowercase(),
        });
        let mut prompter = ScriptedPrompter {
            token: "ghp_test".into(),
            confirm: Some(true),
        };

        let outcome = run_flow(&api, &mut prompter, &store).unwrap();
        assert_eq!(outcome, ConnectOutcome::AlreadyPresent);
        assert!(api.uploads.borrow().is_empty());
        assert!(store.load().github_key_added);
    }

    #[test]
    fn missing_read_scope_aborts_before_any_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi {
            read_scope_missing: true,
            ..FakeApi::default()
        };
        let mut prompter = ScriptedPrompter {
            token: "ghp_test".into(),
            confirm: Some(true),
        };

        let err = run_flow(&api, &mut prompter, &store).unwrap_err();
        assert!(matches!(
            err,
            SignetError::InsufficientScope {
                scope: TokenScope::Read
            }
        ));
        assert!(api.uploads.borrow().is_empty());
        assert!(!store.load().github_key_added);
    }

    #[test]
    fn missing_write_scope_is_distinct_from_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi {
            write_scope_missing: true,
            ..FakeApi::default()
        };
        let mut prompter = ScriptedPrompter {
            token: "ghp_test".into(),
            confirm: Some(true),
        };

        let err = run_flow(&api, &mut prompter, &store).unwrap_err();
        assert!(matches!(
            err,
            SignetError::InsufficientScope {
                scope: TokenScope::Write
            }
        ));
    }

    #[test]
    fn confirmation_timeout_means_skip_and_config_unchanged() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi::default();
        let mut prompter = ScriptedPrompter {
            token: "ghp_test".into(),
            confirm: None, // timed out
        };

        let outcome = run_flow(&api, &mut prompter, &store).unwrap();
        assert_eq!(outcome, ConnectOutcome::Skipped);
        assert!(api.uploads.borrow().is_empty());
        assert!(!store.load().github_key_added);
    }

    #[test]
    fn slow_propagation_still_records_the_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi {
            slow_propagation: true,
            ..FakeApi::default()
        };
        let mut prompter = ScriptedPrompter {
            token: "ghp_test".into(),
            confirm: Some(true),
        };

        let outcome = run_flow(&api, &mut prompter, &store).unwrap();
        assert_eq!(outcome, ConnectOutcome::UploadedUnverified);
        assert!(store.load().github_key_added);
    }

    #[test]
    fn empty_token_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = temp_store(&dir);
        let api = FakeApi::default();
        let mut prompter = ScriptedPrompter {
            token: String::new(),
            confirm: Some(true),
        };

        let err = run_flow(&api, &mut prompter, &store).unwrap_err();
        assert!(matches!(err, SignetError::InvalidToken));
    }
}
