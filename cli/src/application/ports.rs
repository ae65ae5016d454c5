//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `clusterkit_common` —
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use clusterkit_common::State;

use crate::domain::InstallerConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program to completion and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
}

// ── Provisioning Tool Port ────────────────────────────────────────────────────

/// The two phases of the external provisioning tool, run against a staged
/// workspace directory.
#[allow(async_fn_in_trait)]
pub trait Terraform {
    /// Prepare the workspace (providers, modules, backend).
    async fn init(&self, workspace: &Path) -> Result<()>;
    /// Create the infrastructure described by the workspace.
    ///
    /// A failed apply may still leave a partial state file at
    /// [`Terraform::state_path`].
    async fn apply(&self, workspace: &Path) -> Result<()>;
    /// Where `apply` writes its state file inside `workspace`.
    fn state_path(&self, workspace: &Path) -> PathBuf;
}

// ── Template Port ─────────────────────────────────────────────────────────────

/// Key of the shared bootstrap configuration template.
pub const CONFIG_TEMPLATE: &str = "config.tf";

/// Materializes bundled configuration templates onto disk.
pub trait TemplateUnpacker {
    /// Unpack the templates stored under `key` to `destination`.
    ///
    /// A directory key (a platform name) is unpacked *into* `destination`;
    /// a file key (e.g. [`CONFIG_TEMPLATE`]) is written *as* `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is unknown or a file cannot be written.
    fn unpack(&self, destination: &Path, key: &str) -> Result<()>;
}

// ── Asset Store Port ──────────────────────────────────────────────────────────

/// Persists generated asset states.
pub trait AssetStore {
    /// Write every content of `state` and return the written paths.
    fn save(&self, state: &State) -> Result<Vec<PathBuf>>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading the installer configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    fn load(&self) -> Result<InstallerConfig>;
    /// Path the configuration is read from.
    fn path(&self) -> Result<PathBuf>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
