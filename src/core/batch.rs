//! The delivery pipeline: parse once, fetch the key once, then seal and
//! upsert each entry in source order.
//!
//! Entries are independent, so one bad value never blocks the rest: a
//! failed seal or upsert is recorded against that entry and the run moves
//! on. Only the run's prerequisites — a readable source and a fetchable
//! public key — abort the whole batch, and both happen before any remote
//! mutation.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::github::{Destination, GithubClient};
use crate::core::keys::{DestinationKey, KeyCache};
use crate::core::seal;
use crate::core::source::{self, SecretEntry};
use crate::core::validation;
use crate::error::{BatchError, Result};

/// Terminal state of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Succeeded,
    Failed,
}

/// The recorded result for one entry, in source order.
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutcome {
    pub name: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryOutcome {
    fn succeeded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: EntryStatus::Succeeded,
            error: None,
        }
    }

    fn failed(name: impl Into<String>, error: String) -> Self {
        Self {
            name: name.into(),
            status: EntryStatus::Failed,
            error: Some(error),
        }
    }
}

/// Everything a run did: one outcome per parsed entry, input order
/// preserved, no entry dropped. Summary counts are derived from it.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == EntryStatus::Succeeded)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == EntryStatus::Failed)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Deliver every entry in `source_path` to `dest`.
///
/// Entries are processed sequentially; each awaits its own round trip
/// before the next starts, keeping the report deterministic in order and
/// avoiding concurrent writes to the same repository's secret list.
///
/// # Arguments
///
/// * `client` - Authenticated store client
/// * `dest` - Target repository
/// * `source_path` - Path to the dotenv-style source file
///
/// # Errors
///
/// Returns `SourceError` if the source cannot be read, or
/// `BatchError::KeyFetch` if the repository key cannot be fetched. Both
/// abort before anything is sent. Per-entry failures do not error; they
/// are recorded in the returned [`RunReport`].
pub async fn run(client: &GithubClient, dest: &Destination, source_path: &Path) -> Result<RunReport> {
    let entries = source::load(source_path)?;

    if entries.is_empty() {
        debug!(
            source = %source_path.display(),
            "source has no entries, nothing to deliver"
        );
        return Ok(RunReport::default());
    }

    info!(
        destination = %dest,
        entries = entries.len(),
        "starting delivery run"
    );

    let mut keys = KeyCache::new(client);
    let key = keys
        .get(dest)
        .await
        .map_err(|source| BatchError::KeyFetch {
            owner: dest.owner.clone(),
            repo: dest.repo.clone(),
            source,
        })?;

    let mut report = RunReport::default();
    for entry in &entries {
        match deliver_entry(client, dest, &key, entry).await {
            Ok(()) => {
                debug!(name = %entry.name, "secret delivered");
                report.outcomes.push(EntryOutcome::succeeded(&entry.name));
            }
            Err(err) => {
                warn!(name = %entry.name, error = %err, "entry failed");
                report
                    .outcomes
                    .push(EntryOutcome::failed(&entry.name, err.to_string()));
            }
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "delivery run finished"
    );

    Ok(report)
}

/// Validate, seal, and upsert a single entry. Encryption and submission
/// are atomic from the caller's perspective: any failure here marks the
/// entry failed and nothing partial goes on the wire.
async fn deliver_entry(
    client: &GithubClient,
    dest: &Destination,
    key: &DestinationKey,
    entry: &SecretEntry,
) -> Result<()> {
    validation::validate_name(&entry.name)?;

    let sealed = seal::seal(entry.value.as_bytes(), &key.public_key)?;
    let encrypted_value = general_purpose::STANDARD.encode(sealed);

    client
        .put_secret(dest, &entry.name, &encrypted_value, &key.key_id)
        .await?;

    Ok(())
}
