//! Shared-secret authorization.

use crate::{Config, Error, Result};

/// Check the request secret against the configured one.
///
/// A missing `API_SECRET` rejects every request rather than letting an empty
/// provided secret match an empty configured one. Nothing is attempted after
/// a mismatch; the caller maps this to a 402 response.
pub fn verify_secret(config: &Config, provided: &str) -> Result<()> {
    if config.api_secret.is_empty() {
        return Err(Error::Config("API_SECRET is not configured".to_string()));
    }
    if provided != config.api_secret {
        return Err(Error::Unauthorized("secret mismatch".to_string()));
    }
    Ok(())
}
