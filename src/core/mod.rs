//! Core library components.
//!
//! This module contains the reusable delivery pipeline: source parsing,
//! sealed-box encryption, the store client, and the batch runner that
//! ties them together.

pub mod batch;
pub mod github;
pub mod keys;
pub mod seal;
pub mod source;
pub mod validation;
