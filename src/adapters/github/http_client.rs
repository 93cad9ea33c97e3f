use std::time::Duration;

use crate::core::errors::{Result, SignetError, TokenScope};
use crate::core::models::github_key::{GithubApiError, GithubGpgKey, NewGpgKey};
use crate::core::traits::github::GithubApi;

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Timeout for the small GPG-keys API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// GitHub REST client for the GPG-keys endpoints.
///
/// The base URL is injectable so tests can point it at a local stub server.
pub struct HttpGithubClient {
    api_base: String,
}

impl HttpGithubClient {
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
        }
    }

    pub fn with_base(api_base: String) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Build a reqwest client with the request timeout and user agent set.
    fn build_client() -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("signet/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SignetError::Network {
                reason: format!("failed to create HTTP client: {e}"),
            })
    }

    /// Drive one async request on a throwaway current-thread runtime.
    fn block_on<F, T>(fut: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SignetError::Network {
                reason: format!("failed to create async runtime: {e}"),
            })?;
        rt.block_on(fut)
    }

    /// Shared GET path: fetch a key list, mapping 401/403 to auth errors.
    fn get_keys(&self, url: String, token: &str) -> Result<Vec<GithubGpgKey>> {
        let token = token.to_string();
        Self::block_on(async move {
            let client = Self::build_client()?;
            let mut req = client.get(&url).header("Accept", "application/vnd.github+json");
            if !token.is_empty() {
                req = req.bearer_auth(&token);
            }
            let resp = req.send().await.map_err(|e| SignetError::Network {
                reason: format!("request to {url} failed: {e}"),
            })?;

            match resp.status().as_u16() {
                200 => resp
                    .json::<Vec<GithubGpgKey>>()
                    .await
                    .map_err(|e| SignetError::Network {
                        reason: format!("failed to parse key list: {e}"),
                    }),
                401 => Err(SignetError::InvalidToken),
                403 => Err(SignetError::InsufficientScope {
                    scope: TokenScope::Read,
                }),
                status => Err(SignetError::Network {
                    reason: format!("GitHub returned status {status}"),
                }),
            }
        })
    }
}

impl Default for HttpGithubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubApi for HttpGithubClient {
    fn list_keys(&self, token: &str) -> Result<Vec<GithubGpgKey>> {
        self.get_keys(format!("{}/user/gpg_keys", self.api_base), token)
    }

    fn user_keys(&self, token: &str, username: &str) -> Result<Vec<GithubGpgKey>> {
        self.get_keys(
            format!("{}/users/{username}/gpg_keys", self.api_base),
            token,
        )
    }

    fn upload_key(&self, token: &str, armored_public_key: &str, title: &str) -> Result<()> {
        let url = format!("{}/user/gpg_keys", self.api_base);
        let body = NewGpgKey {
            armored_public_key: armored_public_key.to_string(),
            title: title.to_string(),
        };
        let token = token.to_string();

        Self::block_on(async move {
            let client = Self::build_client()?;
            let resp = client
                .post(&url)
                .header("Accept", "application/vnd.github+json")
                .bearer_auth(&token)
                .json(&body)
                .send()
                .await
                .map_err(|e| SignetError::Network {
                    reason: format!("upload request failed: {e}"),
                })?;

            match resp.status().as_u16() {
                201 => Ok(()),
                401 => Err(SignetError::InvalidToken),
                // Read succeeded earlier, so a 403 here is the write scope.
                403 => Err(SignetError::InsufficientScope {
                    scope: TokenScope::Write,
                }),
                status => {
                    let message = resp
                        .json::<GithubApiError>()
                        .await
                        .map(|e| e.message)
                        .unwrap_or_else(|_| "unknown error".into());
                    Err(SignetError::Upload { status, message })
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// One-connection HTTP stub: answers the next request with a canned
    /// status and JSON body, then exits.
    fn stub_server(status: u16, reason: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            // Drain headers plus any Content-Length body before replying.
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = stream.read(&mut chunk).unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let body_len: usize = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            while buf.len() < header_end + body_len {
                let n = stream.read(&mut chunk).unwrap();
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status} {reason}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        base
    }

    #[test]
    fn list_keys_parses_a_two_hundred() {
        let base = stub_server(
            200,
            "OK",
            r#"[{"id":7,"key_id":"59ABCDEF01234567","fingerprint":"AAAA1111BBBB2222CCCC3333DDDD4444EEEE5555"}]"#,
        );
        let client = HttpGithubClient::with_base(base);

        let keys = client.list_keys("ghp_token").unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].key_id, "59ABCDEF01234567");
        assert!(keys[0].matches_fingerprint("aaaa1111bbbb2222cccc3333dddd4444eeee5555"));
    }

    #[test]
    fn list_keys_maps_unauthorized_to_invalid_token() {
        let base = stub_server(401, "Unauthorized", r#"{"message":"Bad credentials"}"#);
        let client = HttpGithubClient::with_base(base);

        let err = client.list_keys("ghp_expired").unwrap_err();
        assert!(matches!(err, SignetError::InvalidToken));
    }

    #[test]
    fn list_keys_maps_forbidden_to_missing_read_scope() {
        let base = stub_server(403, "Forbidden", r#"{"message":"scope missing"}"#);
        let client = HttpGithubClient::with_base(base);

        let err = client.list_keys("ghp_scopeless").unwrap_err();
        assert!(matches!(
            err,
            SignetError::InsufficientScope {
                scope: TokenScope::Read
            }
        ));
    }

    #[test]
    fn upload_accepts_a_created_response() {
        let base = stub_server(201, "Created", r#"{"id":8}"#);
        let client = HttpGithubClient::with_base(base);

        client
            .upload_key("ghp_token", "-----BEGIN PGP PUBLIC KEY BLOCK-----", "GPG Key 59ABCDEF - jane")
            .unwrap();
    }

    #[test]
    fn upload_maps_forbidden_to_missing_write_scope() {
        let base = stub_server(403, "Forbidden", r#"{"message":"scope missing"}"#);
        let client = HttpGithubClient::with_base(base);

        let err = client
            .upload_key("ghp_readonly", "-----BEGIN PGP PUBLIC KEY BLOCK-----", "title")
            .unwrap_err();
        assert!(matches!(
            err,
            SignetError::InsufficientScope {
                scope: TokenScope::Write
            }
        ));
    }

    #[test]
    fn upload_surfaces_the_api_message_on_other_statuses() {
        let base = stub_server(422, "Unprocessable Entity", r#"{"message":"key is already in use"}"#);
        let client = HttpGithubClient::with_base(base);

        let err = client
            .upload_key("ghp_token", "-----BEGIN PGP PUBLIC KEY BLOCK-----", "title")
            .unwrap_err();
        match err {
            SignetError::Upload { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "key is already in use");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
