use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

const KEY_ID: &str = "59ABCDEF01234567";

/// Fake gpg that answers the calls Signet makes with canned colon output.
const FAKE_GPG: &str = r#"#!/bin/sh
case "$*" in
    *--version*)
        echo "gpg (GnuPG) 2.4.4"
        ;;
    *UNKNOWNKEY*)
        echo "gpg: error reading key: No secret key" >&2
        exit 2
        ;;
    *--gen-key*)
        cat > "${FAKE_GPG_BATCH_LOG:-/dev/null}"
        ;;
    *--list-secret-keys*--with-colons*)
        cat <<'EOF'
sec:u:4096:1:59ABCDEF01234567:1718700000:::u:::scESC:::+:::23::0:
fpr:::::::::AAAA1111BBBB2222CCCC3333DDDD4444EEEE5555:
uid:u::::1718700000::HASH::Jane Doe <jane@example.com>::::::::::0:
ssb:u:4096:1:1122334455667788:1718700000::::::e:::+:::23:
EOF
        ;;
    *--armor*--export*)
        echo "-----BEGIN PGP PUBLIC KEY BLOCK-----"
        echo "mQINBFtestkey"
        echo "-----END PGP PUBLIC KEY BLOCK-----"
        ;;
    *--fingerprint*)
        echo "fpr:::::::::AAAA1111BBBB2222CCCC3333DDDD4444EEEE5555:"
        ;;
    *--delete-secret-and-public-key*)
        ;;
    *)
        exit 2
        ;;
esac
"#;

/// Fake git whose global config has the fake key as signing key.
const FAKE_GIT: &str = r#"#!/bin/sh
case "$*" in
    *--get*user.signingkey*)
        echo "59ABCDEF01234567"
        ;;
    *--get*user.email*)
        echo "jane@example.com"
        ;;
    *--get*)
        exit 1
        ;;
    *)
        exit 0
        ;;
esac
"#;

/// Install the fake tools and return a PATH with them in front.
fn fake_tools(dir: &assert_fs::TempDir) -> String {
    write_tool(dir, "gpg", FAKE_GPG);
    write_tool(dir, "git", FAKE_GIT);
    let system_path = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", dir.path().join("bin").display(), system_path)
}

fn write_tool(dir: &assert_fs::TempDir, name: &str, script: &str) {
    let tool = dir.child(format!("bin/{name}"));
    tool.write_str(script).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tool.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}

fn signet() -> Command {
    cargo_bin_cmd!("signet")
}

#[test]
fn list_shows_keys_and_git_state() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = fake_tools(&dir);

    signet()
        .env("PATH", &path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe <jane@example.com>"))
        .stdout(predicate::str::contains(KEY_ID))
        .stdout(predicate::str::contains("RSA/4096"))
        .stdout(predicate::str::contains("signing configured (jane@example.com)"));
}

#[test]
fn export_prints_the_armored_key() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = fake_tools(&dir);

    signet()
        .env("PATH", &path)
        .args(["export", "--key-id", KEY_ID])
        .assert()
        .success()
        .stdout(predicate::str::contains("-----BEGIN PGP PUBLIC KEY BLOCK-----"))
        .stdout(predicate::str::contains("-----END PGP PUBLIC KEY BLOCK-----"));
}

#[test]
fn create_records_the_new_key_and_configures_git() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = fake_tools(&dir);
    let config_dir = dir.child("config");
    let batch_log = dir.child("batch.txt");

    signet()
        .env("PATH", &path)
        .env("FAKE_GPG_BATCH_LOG", batch_log.path())
        .args([
            "create",
            "--name",
            "Jane Doe",
            "--email",
            "jane@example.com",
            "--comment",
            "",
            "--expire",
            "0",
        ])
        .arg("--config-dir")
        .arg(config_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Created key {KEY_ID}")))
        .stdout(predicate::str::contains("Git signing configured"));

    // The generation spec travels over stdin, never through a file of ours.
    batch_log
        .assert(predicate::str::contains("Name-Real: Jane Doe"))
        .assert(predicate::str::contains("%no-protection"));

    config_dir
        .child("config.json")
        .assert(predicate::str::contains(KEY_ID))
        .assert(predicate::str::contains("\"git_configured\": true"))
        .assert(predicate::str::contains("jane@example.com"));
}

#[test]
fn create_rejects_bad_expiration() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = fake_tools(&dir);

    signet()
        .env("PATH", &path)
        .args([
            "create",
            "--name",
            "Jane Doe",
            "--email",
            "jane@example.com",
            "--comment",
            "",
            "--expire",
            "someday",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid expiration 'someday'"));
}

#[test]
fn delete_without_secret_key_is_a_distinct_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = fake_tools(&dir);

    signet()
        .env("PATH", &path)
        .args(["delete", "--key-id", "UNKNOWNKEY"])
        .arg("--config-dir")
        .arg(dir.child("config").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No secret key found for 'UNKNOWNKEY'"));
}

#[test]
fn delete_clears_the_local_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    let path = fake_tools(&dir);
    let config_dir = dir.child("config");

    // Configure first so there is something to clear.
    signet()
        .env("PATH", &path)
        .args(["git", "--key-id", KEY_ID])
        .arg("--config-dir")
        .arg(config_dir.path())
        .assert()
        .success();

    signet()
        .env("PATH", &path)
        .args(["delete", "--key-id", KEY_ID])
        .arg("--config-dir")
        .arg(config_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted key {KEY_ID}")));

    config_dir
        .child("config.json")
        .assert(predicate::str::contains("\"gpg_key_id\": \"\""));
}
