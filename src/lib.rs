//! Pigeon - deliver .env secrets to GitHub Actions, sealed end-to-end.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── push          # Deliver a .env file as repository secrets
//! │   ├── list          # List remote secret names
//! │   ├── rm            # Delete a remote secret
//! │   └── completions   # Shell completions
//! ├── config            # Token and API URL resolution
//! └── core/             # Core library components
//!     ├── source        # Dotenv-style source parsing
//!     ├── validation    # Secret name rules
//!     ├── seal          # Sealed-box encryption (libsodium format)
//!     ├── github        # Actions secrets API client
//!     ├── keys          # Run-scoped public key cache
//!     └── batch         # The delivery pipeline
//! ```
//!
//! # Features
//!
//! - Anonymous sealed-box encryption compatible with `crypto_box_seal`
//! - One key fetch per repository per run
//! - Per-entry failure isolation with an ordered run report
//! - Plaintext values zeroized after submission

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
