//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use clusterkit_common::{ContentError, TfVarsError};
use thiserror::Error;

use crate::domain::asset::AssetId;

/// Boxed source for errors raised by third-party primitives (entropy,
/// PEM encoding) that the domain does not name directly.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ── Asset errors ──────────────────────────────────────────────────────────────

/// Errors raised by an asset's `generate` call.
///
/// Every variant names the operation that failed; the underlying cause is
/// kept as the error source.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to get {what} from parent")]
    MissingParent { what: &'static str },

    #[error("parent {what} produced no content")]
    EmptyParent { what: &'static str },

    #[error("failed to create temp dir for terraform execution")]
    Workspace(#[source] std::io::Error),

    #[error("failed to remove terraform workspace {}", path.display())]
    RemoveWorkspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name}")]
    ParseVariables {
        name: String,
        #[source]
        source: TfVarsError,
    },

    #[error("failed to unpack '{key}' templates")]
    Unpack {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to initialize terraform")]
    TerraformInit(#[source] anyhow::Error),

    #[error("failed to run terraform")]
    TerraformApply(#[source] anyhow::Error),

    #[error("failed to read terraform state {}", path.display())]
    ReadState {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to generate private key")]
    KeyGeneration(#[source] BoxError),

    #[error("failed to encode {half} key as PEM")]
    KeyEncoding {
        half: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("invalid output file name '{0}'")]
    InvalidOutputName(String),

    #[error("failed to assemble asset state")]
    Content(#[from] ContentError),
}

impl AssetError {
    /// `true` for failures caused by the caller not supplying a required
    /// parent state, as opposed to failures of the asset's own work.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingParent { .. } | Self::EmptyParent { .. })
    }
}

// ── Graph errors ──────────────────────────────────────────────────────────────

/// Errors related to building or walking the asset graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("asset '{asset}' depends on {dependency}, which is not in the graph")]
    UnknownDependency { asset: String, dependency: AssetId },

    #[error("{0} is not in the graph")]
    UnknownAsset(AssetId),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
