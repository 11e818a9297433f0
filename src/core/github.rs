//! Authenticated client for the GitHub Actions secrets API.
//!
//! The client is an explicit value handed to the code that needs it, never
//! a process-wide global, so tests can point it at a fake server.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// GitHub REST API version header value.
const API_VERSION: &str = "2022-11-28";

/// Per-request timeout. The store is a single HTTP hop; anything slower
/// than this is effectively down.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The (owner, repository) pair a secret is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub owner: String,
    pub repo: String,
}

impl Destination {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A repository's current encryption key, as the API returns it.
///
/// `key` is base64-encoded X25519 public key material; `key_id` is the
/// opaque identifier the store expects back alongside each sealed value.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoPublicKey {
    pub key: String,
    pub key_id: String,
}

/// Metadata for one secret as listed by the store (values are never
/// returned).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSecret {
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
struct SecretsPage {
    secrets: Vec<RemoteSecret>,
}

#[derive(Debug, Serialize)]
struct PutSecretBody<'a> {
    encrypted_value: &'a str,
    key_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// HTTP client for the repository-secrets endpoints.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// Build a client for the given token and API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(token: impl Into<String>, base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .request(method, &url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(
                "User-Agent",
                concat!("pigeon/", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Fetch the repository's current public key and key id.
    pub async fn fetch_public_key(&self, dest: &Destination) -> Result<RepoPublicKey, ApiError> {
        debug!(destination = %dest, "fetching repository public key");

        let path = format!(
            "/repos/{}/{}/actions/secrets/public-key",
            dest.owner, dest.repo
        );
        let res = self.request(reqwest::Method::GET, &path).send().await?;

        match res.status() {
            StatusCode::OK => Ok(res.json().await?),
            status => Err(api_error(status, res).await),
        }
    }

    /// Create or update one secret. The store does not distinguish the two
    /// cases to the caller (201 on create, 204 on update — both success).
    pub async fn put_secret(
        &self,
        dest: &Destination,
        name: &str,
        encrypted_value: &str,
        key_id: &str,
    ) -> Result<(), ApiError> {
        debug!(destination = %dest, name, "upserting secret");

        let path = format!("/repos/{}/{}/actions/secrets/{}", dest.owner, dest.repo, name);
        let body = PutSecretBody {
            encrypted_value,
            key_id,
        };
        let res = self
            .request(reqwest::Method::PUT, &path)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, res).await)
        }
    }

    /// List secret names (with timestamps) stored for the repository.
    pub async fn list_secrets(&self, dest: &Destination) -> Result<Vec<RemoteSecret>, ApiError> {
        debug!(destination = %dest, "listing secrets");

        let path = format!(
            "/repos/{}/{}/actions/secrets?per_page=100",
            dest.owner, dest.repo
        );
        let res = self.request(reqwest::Method::GET, &path).send().await?;

        match res.status() {
            StatusCode::OK => {
                let page: SecretsPage = res.json().await?;
                Ok(page.secrets)
            }
            status => Err(api_error(status, res).await),
        }
    }

    /// Delete one secret by name.
    pub async fn delete_secret(&self, dest: &Destination, name: &str) -> Result<(), ApiError> {
        debug!(destination = %dest, name, "deleting secret");

        let path = format!("/repos/{}/{}/actions/secrets/{}", dest.owner, dest.repo, name);
        let res = self.request(reqwest::Method::DELETE, &path).send().await?;

        let status = res.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, res).await)
        }
    }
}

// The token never appears in logs or debug output.
impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Map a non-success response to an `ApiError`, pulling the store's own
/// `message` out of the body when there is one.
async fn api_error(status: StatusCode, res: reqwest::Response) -> ApiError {
    let message = match res.json::<ApiMessage>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation { message },
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}
