//! Infrastructure implementation of the `Terraform` port on top of the
//! `terraform` command-line binary.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::assets::STATE_FILE_NAME;
use crate::application::ports::{CommandRunner, Terraform};
use crate::domain::TerraformConfig;

/// Drives `terraform init` and `terraform apply` through a [`CommandRunner`].
pub struct TerraformCli<R> {
    runner: R,
    binary: String,
    init_timeout: Duration,
    apply_timeout: Duration,
}

impl<R: CommandRunner> TerraformCli<R> {
    #[must_use]
    pub fn new(runner: R, binary: impl Into<String>, init_timeout: Duration, apply_timeout: Duration) -> Self {
        Self {
            runner,
            binary: binary.into(),
            init_timeout,
            apply_timeout,
        }
    }

    #[must_use]
    pub fn from_config(runner: R, config: &TerraformConfig) -> Self {
        Self::new(
            runner,
            config.binary.clone(),
            config.init_timeout(),
            config.apply_timeout(),
        )
    }

    async fn exec(&self, workspace: &Path, args: &[&str], timeout: Duration) -> Result<()> {
        let chdir = format!("-chdir={}", workspace.display());
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(chdir.as_str());
        full.extend_from_slice(args);

        debug!(binary = %self.binary, args = ?full, "running terraform");
        let output = self
            .runner
            .run_with_timeout(&self.binary, &full, timeout)
            .await
            .with_context(|| format!("running {} {}", self.binary, args.first().unwrap_or(&"")))?;
        check_status(&output, args.first().copied().unwrap_or_default())
    }
}

impl<R: CommandRunner> Terraform for TerraformCli<R> {
    async fn init(&self, workspace: &Path) -> Result<()> {
        self.exec(workspace, &["init", "-input=false", "-no-color"], self.init_timeout)
            .await
    }

    async fn apply(&self, workspace: &Path) -> Result<()> {
        let state = format!("-state={STATE_FILE_NAME}");
        self.exec(
            workspace,
            &["apply", "-auto-approve", "-input=false", "-no-color", &state],
            self.apply_timeout,
        )
        .await
    }

    fn state_path(&self, workspace: &Path) -> PathBuf {
        workspace.join(STATE_FILE_NAME)
    }
}

/// Turn a non-zero exit into an error carrying terraform's diagnostics.
fn check_status(output: &Output, phase: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let code = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    if stderr.is_empty() {
        anyhow::bail!("terraform {phase} exited with status {code}")
    }
    anyhow::bail!("terraform {phase} exited with status {code}: {stderr}")
}
