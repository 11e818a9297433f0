//! Run-scoped cache of repository public keys.
//!
//! The store rotates a repository's encryption key rarely; within one run
//! it is fetched at most once per destination and reused for every entry.
//! Nothing is cached across runs.

use std::collections::HashMap;

use base64::{engine::general_purpose, Engine as _};
use tracing::{debug, trace};

use crate::core::github::{Destination, GithubClient, RepoPublicKey};
use crate::error::ApiError;

/// A destination's encryption key, decoded and ready to seal against.
#[derive(Debug, Clone)]
pub struct DestinationKey {
    /// Raw X25519 public key bytes (decoded from the API's base64).
    pub public_key: Vec<u8>,
    /// Opaque identifier the store expects back alongside sealed values.
    pub key_id: String,
    /// When this key was fetched, for the audit trail.
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Memoizing fetcher of [`DestinationKey`]s, scoped to one run.
pub struct KeyCache<'a> {
    client: &'a GithubClient,
    cached: HashMap<Destination, DestinationKey>,
}

impl<'a> KeyCache<'a> {
    pub fn new(client: &'a GithubClient) -> Self {
        Self {
            client,
            cached: HashMap::new(),
        }
    }

    /// Get the public key for a destination, fetching it on first use.
    ///
    /// A second call for the same destination within the run returns the
    /// memoized key without touching the network.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the fetch fails or the key material in the
    /// response cannot be decoded. Callers treat either as fatal for the
    /// batch aimed at this destination.
    pub async fn get(&mut self, dest: &Destination) -> Result<DestinationKey, ApiError> {
        if let Some(key) = self.cached.get(dest) {
            trace!(destination = %dest, "public key cache hit");
            return Ok(key.clone());
        }

        let fetched = self.client.fetch_public_key(dest).await?;
        let key = decode_key(fetched)?;

        debug!(
            destination = %dest,
            key_id = %key.key_id,
            "fetched repository public key"
        );

        self.cached.insert(dest.clone(), key.clone());
        Ok(key)
    }
}

fn decode_key(fetched: RepoPublicKey) -> Result<DestinationKey, ApiError> {
    let public_key = general_purpose::STANDARD
        .decode(&fetched.key)
        .map_err(|e| ApiError::Response(format!("public key is not valid base64: {}", e)))?;

    Ok(DestinationKey {
        public_key,
        key_id: fetched.key_id,
        fetched_at: chrono::Utc::now(),
    })
}
