//! A fake secret store backed by wiremock.
//!
//! The store holds a real X25519 keypair and serves its public half the
//! way the GitHub Actions API does, so tests can open whatever the
//! pipeline sealed and check the exact plaintext that would reach the
//! store. No endpoint is mounted by default; each test states what the
//! store will serve.

use base64::{engine::general_purpose, Engine as _};
use crypto_box::SecretKey;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::TEST_TOKEN;

/// Key id served alongside the fake store's public key.
pub const KEY_ID: &str = "568250167242549743";

/// Body of one captured `PUT` secret request.
#[derive(Debug, Deserialize)]
pub struct PutSecretBody {
    pub encrypted_value: String,
    pub key_id: String,
}

/// One fake destination repository and the mock server behind it.
pub struct FakeStore {
    server: MockServer,
    secret_key: SecretKey,
    owner: String,
    repo: String,
}

impl FakeStore {
    /// Start a fake store for one destination.
    pub async fn start(owner: &str, repo: &str) -> Self {
        Self {
            server: MockServer::start().await,
            secret_key: SecretKey::generate(&mut OsRng),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    /// Base URL to hand to the client or the binary via `--api-url`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The store's public key, base64-encoded the way the API returns it.
    pub fn public_key_b64(&self) -> String {
        general_purpose::STANDARD.encode(self.secret_key.public_key().as_bytes())
    }

    fn public_key_path(&self) -> String {
        format!(
            "/repos/{}/{}/actions/secrets/public-key",
            self.owner, self.repo
        )
    }

    fn secret_path(&self, name: &str) -> String {
        format!(
            "/repos/{}/{}/actions/secrets/{}",
            self.owner, self.repo, name
        )
    }

    /// Serve the public key to authenticated requests.
    pub async fn serve_public_key(&self) {
        self.mount_public_key(None).await;
    }

    /// Serve the public key and verify it is fetched exactly `calls`
    /// times. The check runs when the store is dropped.
    pub async fn serve_public_key_expect(&self, calls: u64) {
        self.mount_public_key(Some(calls)).await;
    }

    async fn mount_public_key(&self, expect: Option<u64>) {
        let body = json!({ "key": self.public_key_b64(), "key_id": KEY_ID });
        let mut mock = Mock::given(method("GET"))
            .and(path(self.public_key_path()))
            .and(header("Authorization", format!("Bearer {}", TEST_TOKEN)))
            .and(header("X-GitHub-Api-Version", "2022-11-28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body));
        if let Some(calls) = expect {
            mock = mock.expect(calls);
        }
        mock.mount(&self.server).await;
    }

    /// Serve an arbitrary public-key response body (for malformed key
    /// material).
    pub async fn serve_public_key_raw(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(self.public_key_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Fail the public-key fetch with a status and API error message.
    pub async fn fail_public_key(&self, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(self.public_key_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .mount(&self.server)
            .await;
    }

    /// Accept `PUT` for one secret name with the given success status
    /// (the real store answers 201 on create, 204 on update).
    pub async fn accept_secret(&self, name: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(self.secret_path(name)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Reject `PUT` for one secret name.
    pub async fn reject_secret(&self, name: &str, status: u16, message: &str) {
        Mock::given(method("PUT"))
            .and(path(self.secret_path(name)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .mount(&self.server)
            .await;
    }

    /// Accept `PUT` for every secret name.
    pub async fn accept_all_secrets(&self) {
        Mock::given(method("PUT"))
            .and(path_regex(format!(
                "^/repos/{}/{}/actions/secrets/[^/]+$",
                self.owner, self.repo
            )))
            .respond_with(ResponseTemplate::new(201))
            .mount(&self.server)
            .await;
    }

    /// Serve the secret listing.
    pub async fn serve_secret_list(&self, secrets: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!(
                "/repos/{}/{}/actions/secrets",
                self.owner, self.repo
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(secrets))
            .mount(&self.server)
            .await;
    }

    /// Accept `DELETE` for one secret name.
    pub async fn accept_delete(&self, name: &str) {
        Mock::given(method("DELETE"))
            .and(path(self.secret_path(name)))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    /// Fail `DELETE` for one secret name.
    pub async fn fail_delete(&self, name: &str, status: u16, message: &str) {
        Mock::given(method("DELETE"))
            .and(path(self.secret_path(name)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
            .mount(&self.server)
            .await;
    }

    /// Every `PUT` body received so far, as `(name, body)` in arrival
    /// order.
    pub async fn put_requests(&self) -> Vec<(String, PutSecretBody)> {
        let prefix = format!("/repos/{}/{}/actions/secrets/", self.owner, self.repo);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.method.as_str() == "PUT")
            .filter_map(|req| {
                let name = req.url.path().strip_prefix(prefix.as_str())?.to_string();
                let body = serde_json::from_slice(&req.body).ok()?;
                Some((name, body))
            })
            .collect()
    }

    /// Total requests of any kind the store has seen.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|reqs| reqs.len())
            .unwrap_or(0)
    }

    /// Open a sealed value with the store's private key.
    pub fn open(&self, encrypted_value_b64: &str) -> Vec<u8> {
        let sealed = general_purpose::STANDARD
            .decode(encrypted_value_b64)
            .expect("encrypted value is not valid base64");
        crypto_box::seal_open(&self.secret_key, &sealed).expect("sealed box failed to open")
    }
}
