//! Embedded Terraform templates, compiled into the CLI binary.
//!
//! At compile time, `include_dir!` embeds everything under `data/`:
//!   - `<platform>/`  — one directory of `.tf` files per supported platform
//!   - `config.tf`    — shared bootstrap configuration copied into every workspace

use std::path::Path;

use anyhow::{Context, Result};
use include_dir::{Dir, DirEntry, include_dir};

use crate::application::ports::TemplateUnpacker;

static TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/data");

/// [`TemplateUnpacker`] backed by templates embedded in the binary.
#[derive(Clone, Copy)]
pub struct EmbeddedTemplates {
    root: &'static Dir<'static>,
}

impl Default for EmbeddedTemplates {
    fn default() -> Self {
        Self { root: &TEMPLATES }
    }
}

impl EmbeddedTemplates {
    /// Names of the platform directories available for unpacking.
    #[must_use]
    pub fn platforms(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .root
            .dirs()
            .map(|d| d.path().display().to_string())
            .collect();
        names.sort_unstable();
        names
    }
}

impl TemplateUnpacker for EmbeddedTemplates {
    fn unpack(&self, destination: &Path, key: &str) -> Result<()> {
        if let Some(dir) = self.root.get_dir(key) {
            std::fs::create_dir_all(destination)
                .with_context(|| format!("creating {}", destination.display()))?;
            return write_dir(dir, dir.path(), destination);
        }
        if let Some(file) = self.root.get_file(key) {
            return write_file(destination, file.contents());
        }
        anyhow::bail!(
            "no templates for {key:?} (available platforms: {})",
            self.platforms().join(", ")
        )
    }
}

/// Write every file below `dir` to `destination`, with `prefix` removed
/// from the embedded paths.
fn write_dir(dir: &Dir<'_>, prefix: &Path, destination: &Path) -> Result<()> {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => write_dir(sub, prefix, destination)?,
            DirEntry::File(file) => {
                let relative = file
                    .path()
                    .strip_prefix(prefix)
                    .with_context(|| format!("template {} outside {}", file.path().display(), prefix.display()))?;
                write_file(&destination.join(relative), file.contents())?;
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}
