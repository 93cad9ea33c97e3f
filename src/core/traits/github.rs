use crate::core::errors::Result;
use crate::core::models::github_key::GithubGpgKey;

/// Port over the GitHub GPG-keys REST surface.
///
/// Implementations map 401 to `InvalidToken`, 403 to `InsufficientScope`
/// (read for listing, write for upload) and transport failures to `Network`.
pub trait GithubApi {
    /// `GET /user/gpg_keys`: keys registered for the token's account.
    fn list_keys(&self, token: &str) -> Result<Vec<GithubGpgKey>>;

    /// `GET /users/{username}/gpg_keys`: public listing for any account.
    fn user_keys(&self, token: &str, username: &str) -> Result<Vec<GithubGpgKey>>;

    /// `POST /user/gpg_keys`: upload an armored public key. 201 is success.
    fn upload_key(&self, token: &str, armored_public_key: &str, title: &str) -> Result<()>;
}
