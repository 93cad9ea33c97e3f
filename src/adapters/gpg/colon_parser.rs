use chrono::{DateTime, TimeZone, Utc};

use crate::core::models::key_record::{KeyRecord, SubkeyRecord};

/// Parser for the stable `--with-colons` listing format.
///
/// Records open on a `sec`/`pub` line; subsequent `fpr`, `uid` and
/// `ssb`/`sub` lines attach to the currently open record. Unknown record
/// types are skipped, and malformed lines degrade to missing fields rather
/// than failing the listing.

/// OpenPGP public-key algorithm ids as emitted in field 4.
fn algorithm_name(id: &str) -> String {
    match id {
        "1" | "2" | "3" => "RSA".into(),
        "16" => "Elgamal".into(),
        "17" => "DSA".into(),
        "18" => "ECDH".into(),
        "19" => "ECDSA".into(),
        "22" => "EdDSA".into(),
        other => format!("algo{other}"),
    }
}

/// Creation/expiry fields are epoch seconds; absent or malformed is `None`.
fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    let secs: i64 = field.parse().ok()?;
    Utc.timestamp_opt(secs, 0).single()
}

/// Parse a full key listing into records, in listing order.
///
/// An empty listing is a valid "no keys" result.
pub fn parse_key_listing(output: &str) -> Vec<KeyRecord> {
    let mut keys = Vec::new();
    let mut current: Option<KeyRecord> = None;
    // True once a subkey line opened; later fpr lines belong to it, not
    // to the primary key.
    let mut in_subkey = false;

    for line in output.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields.first().copied() {
            Some("sec") | Some("pub") => {
                if let Some(done) = current.take() {
                    keys.push(done);
                }
                in_subkey = false;
                current = Some(KeyRecord {
                    key_id: fields.get(4).unwrap_or(&"").to_string(),
                    algorithm: algorithm_name(fields.get(3).unwrap_or(&"")),
                    size: fields.get(2).and_then(|s| s.parse().ok()).unwrap_or(0),
                    created: fields.get(5).and_then(|s| parse_timestamp(s)),
                    expires: fields.get(6).and_then(|s| parse_timestamp(s)),
                    uid: String::new(),
                    subkey: None,
                    fingerprint: None,
                });
            }
            Some("fpr") => {
                if let Some(key) = current.as_mut() {
                    if !in_subkey && key.fingerprint.is_none() {
                        key.fingerprint = fields.get(9).map(|s| s.to_string());
                    }
                }
            }
            Some("uid") => {
                if let Some(key) = current.as_mut() {
                    if key.uid.is_empty() {
                        key.uid = fields.get(9).unwrap_or(&"").to_string();
                    }
                }
            }
            Some("ssb") | Some("sub") => {
                in_subkey = true;
                if let Some(key) = current.as_mut() {
                    if key.subkey.is_none() {
                        key.subkey = Some(SubkeyRecord {
                            key_id: fields.get(4).unwrap_or(&"").to_string(),
                            algorithm: algorithm_name(fields.get(3).unwrap_or(&"")),
                            size: fields.get(2).and_then(|s| s.parse().ok()).unwrap_or(0),
                            created: fields.get(5).and_then(|s| parse_timestamp(s)),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    if let Some(done) = current.take() {
        keys.push(done);
    }
    keys
}

/// First primary-key fingerprint in a listing; empty string when absent.
pub fn first_fingerprint(output: &str) -> String {
    parse_key_listing(output)
        .into_iter()
        .find_map(|k| k.fingerprint)
        .unwrap_or_default()
}
