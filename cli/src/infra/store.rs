//! Infrastructure implementation of the `AssetStore` port.
//!
//! `DirectoryStore` writes each content of a state to `<root>/<name>` with
//! an atomic write (temp file + rename) and owner-only permissions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clusterkit_common::{Content, State};

use crate::application::ports::AssetStore;
use crate::domain::is_contained;

/// Asset store rooted at a directory on disk.
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn write(&self, content: &Content) -> Result<PathBuf> {
        anyhow::ensure!(
            is_contained(&content.name),
            "content name {:?} escapes the asset directory",
            content.name
        );
        let path = self.root.join(&content.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }

        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);
        std::fs::write(&temp_path, &content.data)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &path)
            .with_context(|| format!("finalizing {}", path.display()))?;
        Ok(path)
    }
}

impl AssetStore for DirectoryStore {
    fn save(&self, state: &State) -> Result<Vec<PathBuf>> {
        state.contents().iter().map(|c| self.write(c)).collect()
    }
}
