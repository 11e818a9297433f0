//! Input validation for secret names.
//!
//! The parser is forgiving about what it reads; the remote store is not.
//! Names are checked here before anything touches the network.

use crate::error::{Result, ValidationError};

/// Validate a secret name against the remote store's identifier rules.
///
/// Secret names must be valid store identifiers:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot be empty
///
/// The source format accepts a wider charset (`.` and `-`), so a name can
/// parse cleanly and still fail here. That failure belongs to the entry,
/// not the batch.
///
/// # Arguments
///
/// * `name` - The secret name to validate
///
/// # Errors
///
/// Returns `ValidationError` if the name is not a valid store identifier.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidName {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}
