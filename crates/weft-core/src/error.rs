//! Typed catalog errors.
//!
//! Item-level outcomes (not found, conflicts) are carried in
//! `InstallResult`; this type covers infrastructure failures only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Neither the local override nor the remote endpoint produced a
    /// parseable success response.
    #[error("registry unavailable at {url}: {reason}")]
    Unavailable { url: String, reason: String },

    /// The configured base URL cannot be extended into a request path.
    #[error("invalid registry base URL: {0}")]
    InvalidBaseUrl(String),
}

impl RegistryError {
    pub(crate) fn unavailable(url: impl Into<String>, reason: impl ToString) -> Self {
        RegistryError::Unavailable {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
