//! Domain layer — the asset contract, naming rules, config and error types.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.

pub mod asset;
pub mod config;
pub mod error;
pub mod paths;

pub use asset::{Asset, AssetId, Generation, ParentStates};
pub use config::{InstallerConfig, TerraformConfig, validate_config};
pub use error::{AssetError, ConfigError, GraphError};
pub use paths::{TLS_DIR, asset_file_path, is_contained};
