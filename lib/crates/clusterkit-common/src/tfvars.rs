//! The Terraform variables document, read only as far as the platform.
//!
//! The document is otherwise opaque to clusterkit: it is copied verbatim
//! into the Terraform workspace, and every other field is left for the
//! templates to consume.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading a variables document.
#[derive(Debug, Error)]
pub enum TfVarsError {
    #[error("invalid variables document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid platform '{0}': must match ^[a-z0-9][a-z0-9_-]*$")]
    InvalidPlatform(String),
}

/// Infrastructure platform a cluster is provisioned on, e.g. `aws` or
/// `libvirt`. Doubles as the template key for that platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform(String);

impl Platform {
    /// Validate and wrap a platform name.
    ///
    /// # Errors
    ///
    /// Returns [`TfVarsError::InvalidPlatform`] unless the name is a
    /// lowercase identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, TfVarsError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !valid {
            return Err(TfVarsError::InvalidPlatform(name));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The one field of the variables document clusterkit reads.
#[derive(Debug, Clone, Deserialize)]
pub struct TfVars {
    pub platform: Platform,
}

impl TfVars {
    /// Parse a variables document, ignoring unknown fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a JSON object with a valid
    /// `platform` string.
    pub fn from_json(data: &[u8]) -> Result<Self, TfVarsError> {
        let vars: Self = serde_json::from_slice(data)?;
        // serde(transparent) skips Platform::new; re-validate here.
        Platform::new(vars.platform.0.clone())?;
        Ok(vars)
    }
}
