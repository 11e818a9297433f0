//! Error types for pigeon operations.
//!
//! Errors are grouped by domain and roll up into [`Error`] via `#[from]`.
//! Batch-fatal conditions (config, source, key fetch) surface as `Err` from
//! the pipeline; per-entry failures are recorded in the run report instead
//! of unwinding it.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Seal(#[from] SealError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Startup configuration errors. Always fatal before any work starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GitHub token not found: set GITHUB_FINE_GRAINED_PAT or GITHUB_PAT")]
    MissingToken,

    #[error("invalid API base URL: {0}")]
    InvalidApiUrl(String),
}

/// Errors reading the key/value source file. Fatal to the whole batch.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source file not found: {0}")]
    NotFound(String),

    #[error("failed to read source file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Sealed-box encryption errors. Isolated to the entry being sealed.
#[derive(Error, Debug)]
pub enum SealError {
    #[error("invalid recipient key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("sealing failed: {0}")]
    Sealing(String),
}

/// Remote store (GitHub API) errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unauthorized: check the token's repository permissions")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rejected by the secret store: {message}")]
    Validation { message: String },

    #[error("secret store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from the secret store: {0}")]
    Response(String),
}

/// Secret name validation errors. Isolated to the entry being checked.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("secret name cannot be empty")]
    EmptyName,

    #[error("invalid secret name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}

/// Batch-level errors.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to fetch public key for {owner}/{repo}: {source}")]
    KeyFetch {
        owner: String,
        repo: String,
        #[source]
        source: ApiError,
    },

    #[error("{failed} of {total} secrets failed to deliver")]
    EntriesFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
