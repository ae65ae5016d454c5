//! Shared mock infrastructure for unit tests.
//!
//! Provides recording [`Terraform`] and [`TemplateUnpacker`] implementations
//! so each test file doesn't have to re-define the same boilerplate.

#![allow(clippy::expect_used, dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use clusterkit_cli::application::ports::{TemplateUnpacker, Terraform};

// ── Mock: Terraform ───────────────────────────────────────────────────────────

/// What the mock observed. Shared between the test and the asset under test.
#[derive(Default)]
pub struct TerraformLog {
    /// Phases run, in order (`"init"`, `"apply"`).
    pub calls: Vec<&'static str>,
    /// Workspace passed to each phase.
    pub workspaces: Vec<PathBuf>,
    /// Files present in the workspace when `init` ran, with their bytes.
    pub staged: BTreeMap<String, Vec<u8>>,
}

/// Terraform double with scripted outcomes.
#[derive(Clone, Default)]
pub struct MockTerraform {
    pub init_error: Option<&'static str>,
    pub apply_error: Option<&'static str>,
    /// Bytes `apply` writes to the state file before returning.
    pub state: Option<&'static [u8]>,
    pub log: Rc<RefCell<TerraformLog>>,
}

impl MockTerraform {
    pub fn writing_state(state: &'static [u8]) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.borrow().calls.clone()
    }

    pub fn workspaces(&self) -> Vec<PathBuf> {
        self.log.borrow().workspaces.clone()
    }

    pub fn staged(&self) -> BTreeMap<String, Vec<u8>> {
        self.log.borrow().staged.clone()
    }
}

fn snapshot(root: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
    for entry in std::fs::read_dir(dir).expect("read workspace") {
        let path = entry.expect("dir entry").path();
        if path.is_dir() {
            snapshot(root, &path, out);
        } else {
            let name = path
                .strip_prefix(root)
                .expect("inside workspace")
                .to_string_lossy()
                .into_owned();
            out.insert(name, std::fs::read(&path).expect("read staged file"));
        }
    }
}

impl Terraform for MockTerraform {
    async fn init(&self, workspace: &Path) -> Result<()> {
        {
            let mut log = self.log.borrow_mut();
            log.calls.push("init");
            log.workspaces.push(workspace.to_path_buf());
            snapshot(workspace, workspace, &mut log.staged);
        }
        match self.init_error {
            Some(msg) => anyhow::bail!("{msg}"),
            None => Ok(()),
        }
    }

    async fn apply(&self, workspace: &Path) -> Result<()> {
        {
            let mut log = self.log.borrow_mut();
            log.calls.push("apply");
            log.workspaces.push(workspace.to_path_buf());
        }
        if let Some(state) = self.state {
            std::fs::write(self.state_path(workspace), state).expect("write mock state");
        }
        match self.apply_error {
            Some(msg) => anyhow::bail!("{msg}"),
            None => Ok(()),
        }
    }

    fn state_path(&self, workspace: &Path) -> PathBuf {
        workspace.join("terraform.tfstate")
    }
}

// ── Mock: templates ───────────────────────────────────────────────────────────

/// Template double that writes a marker file per unpack and records calls.
#[derive(Clone, Default)]
pub struct MockTemplates {
    /// Key that fails to unpack.
    pub fail_key: Option<&'static str>,
    pub calls: Rc<RefCell<Vec<(PathBuf, String)>>>,
}

impl MockTemplates {
    pub fn failing(key: &'static str) -> Self {
        Self {
            fail_key: Some(key),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.borrow().clone()
    }
}

impl TemplateUnpacker for MockTemplates {
    fn unpack(&self, destination: &Path, key: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((destination.to_path_buf(), key.to_string()));
        if self.fail_key == Some(key) {
            anyhow::bail!("no templates for {key:?}");
        }
        if destination.is_dir() {
            std::fs::write(destination.join("main.tf"), format!("# {key}\n"))?;
        } else {
            std::fs::write(destination, format!("# {key}\n"))?;
        }
        Ok(())
    }
}
