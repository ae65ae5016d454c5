//! Domain types and validators for clusterkit configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.clusterkit/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstallerConfig {
    /// Terraform invocation settings.
    pub terraform: TerraformConfig,
}

/// How the Terraform binary is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerraformConfig {
    /// Program name (resolved on `PATH`) or path to the binary.
    pub binary: String,
    /// Upper bound for `terraform init`, in seconds.
    pub init_timeout_secs: u64,
    /// Upper bound for `terraform apply`, in seconds.
    pub apply_timeout_secs: u64,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
            init_timeout_secs: 600,
            apply_timeout_secs: 3600,
        }
    }
}

impl TerraformConfig {
    #[must_use]
    pub fn init_timeout(&self) -> Duration {
        Duration::from_secs(self.init_timeout_secs)
    }

    #[must_use]
    pub fn apply_timeout(&self) -> Duration {
        Duration::from_secs(self.apply_timeout_secs)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a loaded configuration.
///
/// # Errors
///
/// Returns an error if the Terraform binary is empty or a timeout is zero.
pub fn validate_config(config: &InstallerConfig) -> Result<()> {
    let tf = &config.terraform;
    if tf.binary.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "terraform.binary",
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    for (key, secs) in [
        ("terraform.init_timeout_secs", tf.init_timeout_secs),
        ("terraform.apply_timeout_secs", tf.apply_timeout_secs),
    ] {
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                key,
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
