use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::adapters::console::console_prompter::ConsolePrompter;
use crate::adapters::git::git_config::GitConfigBackend;
use crate::adapters::github::http_client::HttpGithubClient;
use crate::adapters::gpg::gpg_backend::GpgBackend;
use crate::cli::{context, output};
use crate::core::errors::{Result, SignetError};
use crate::core::services::github_flow::{ConnectOptions, ConnectOutcome, GithubConnectFlow};
use crate::core::traits::keyring::Keyring;
use crate::core::traits::prompter::Prompter;
use crate::core::traits::signing_config::SigningConfig;

/// Execute `signet github`: check for the key on the account, upload it if
/// absent (and confirmed), and record the outcome.
pub fn execute(config_dir: Option<&Path>, key_id: Option<&str>) -> Result<()> {
    let keyring = GpgBackend::new();
    context::ensure_gpg_installed(&keyring)?;

    let mut prompter = ConsolePrompter;
    let key_id = context::resolve_key_id(&keyring, &mut prompter, key_id)?;

    let git = GitConfigBackend::new();
    let username = resolve_username(&git, &mut prompter)?;

    // Show the key up front so a manual upload stays possible even when
    // the token lacks the write scope.
    output::header("Public key");
    println!("{}", keyring.export_public_key(&key_id)?);
    println!("\n  Manual upload: https://github.com/settings/keys → New GPG key");

    output::header("GitHub");
    let api = HttpGithubClient::new();
    let store = context::store_at(config_dir);
    let outcome = GithubConnectFlow {
        keyring: &keyring,
        api: &api,
        prompter: &mut prompter,
        store: &store,
        options: ConnectOptions::default(),
    }
    .run(&key_id, &username, settle_countdown)?;

    match outcome {
        ConnectOutcome::AlreadyPresent => {
            output::success("Key is already registered on GitHub");
        }
        ConnectOutcome::Uploaded => {
            output::success("Key uploaded to GitHub and verified");
        }
        ConnectOutcome::UploadedUnverified => {
            output::success("Key uploaded to GitHub");
            output::warning("Not visible yet — run 'signet status' later to re-check");
        }
        ConnectOutcome::Skipped => {
            output::warning("Upload skipped; nothing was changed");
            println!("  Run 'signet github' again when you are ready.");
        }
    }
    Ok(())
}

/// GitHub username: `github.user`, then `user.name`, then ask.
fn resolve_username(git: &GitConfigBackend, prompter: &mut ConsolePrompter) -> Result<String> {
    let mut username = git.get("github.user")?;
    if username.is_empty() {
        username = git.get("user.name")?;
    }
    if username.is_empty() {
        username = prompter.prompt_text("GitHub username: ")?;
    }
    if username.is_empty() {
        return Err(SignetError::UsernameRequired);
    }
    Ok(username)
}

/// Visible countdown for the settling delay after an upload.
fn settle_countdown(delay: Duration) {
    let secs = delay.as_secs();
    if secs == 0 {
        return;
    }
    let bar = ProgressBar::new(secs);
    if let Ok(style) = ProgressStyle::with_template("  waiting for GitHub {bar:20.cyan} {pos}/{len}s")
    {
        bar.set_style(style);
    }
    for _ in 0..secs {
        std::thread::sleep(Duration::from_secs(1));
        bar.inc(1);
    }
    bar.finish_and_clear();
}
