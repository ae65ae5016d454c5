//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! Terraform binary, embedded templates, configuration and asset files.
//!
//! Imports from `crate::domain` and `crate::application` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod store;
pub mod templates;
pub mod terraform;

pub use command_runner::TokioCommandRunner;
pub use config::YamlConfigStore;
pub use store::DirectoryStore;
pub use templates::EmbeddedTemplates;
pub use terraform::TerraformCli;
