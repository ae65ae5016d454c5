//! Application layer — port trait definitions, asset implementations and
//! use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod assets;
pub mod ports;
pub mod services;

pub use ports::{
    AssetStore, CONFIG_TEMPLATE, CommandRunner, ConfigStore, ProgressReporter, TemplateUnpacker,
    Terraform,
};
