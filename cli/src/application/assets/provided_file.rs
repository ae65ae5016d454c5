//! The `ProvidedFile` asset: a user-supplied file fed into the graph as-is.

use std::path::PathBuf;

use async_trait::async_trait;
use clusterkit_common::{Content, State};

use crate::domain::{Asset, AssetError, AssetId, Generation, ParentStates};

/// Reads a file from disk and exposes it as a single content, named after
/// the file's final path component unless a content name is given.
#[derive(Debug, Clone)]
pub struct ProvidedFile {
    label: &'static str,
    path: PathBuf,
    content_name: Option<String>,
}

impl ProvidedFile {
    /// `label` describes the role of the file in diagnostics, e.g.
    /// `"Terraform Variables"`.
    pub fn new(label: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            label,
            path: path.into(),
            content_name: None,
        }
    }

    /// Store the file's bytes under `name` rather than the file's own name.
    #[must_use]
    pub fn with_content_name(mut self, name: impl Into<String>) -> Self {
        self.content_name = Some(name.into());
        self
    }
}

#[async_trait(?Send)]
impl Asset for ProvidedFile {
    fn name(&self) -> String {
        format!("{} ({})", self.label, self.path.display())
    }

    fn dependencies(&self) -> Vec<AssetId> {
        Vec::new()
    }

    async fn generate(&self, _parents: &ParentStates<'_>) -> Generation {
        let file_name = match &self.content_name {
            Some(name) => Some(name.as_str()),
            None => self.path.file_name().and_then(|n| n.to_str()),
        };
        let Some(file_name) = file_name else {
            return Generation::failed(AssetError::InvalidOutputName(
                self.path.display().to_string(),
            ));
        };
        match tokio::fs::read(&self.path).await {
            Ok(data) => Generation::ok(State::from(Content::new(file_name, data))),
            Err(source) => Generation::failed(AssetError::ReadInput {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
