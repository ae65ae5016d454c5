//! The `Cluster` asset: provisions infrastructure with Terraform and yields
//! the resulting state file.

use std::path::Path;

use async_trait::async_trait;
use clusterkit_common::{Content, State, TfVars};
use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use crate::application::ports::{CONFIG_TEMPLATE, TemplateUnpacker, Terraform};
use crate::domain::{Asset, AssetError, AssetId, Generation, ParentStates, is_contained};

/// Content name of the Terraform state produced by [`Cluster`].
pub const STATE_FILE_NAME: &str = "terraform.tfstate";

/// Content name the variables document must carry for Terraform to load it
/// automatically as JSON.
pub const TFVARS_FILE_NAME: &str = "terraform.tfvars.json";

const TFVARS: &str = "terraform variables";

/// Launches a cluster by running Terraform over the variables file produced
/// by its first parent and the templates for the selected platform.
///
/// Dependencies, in order:
/// 0. the Terraform variables file (its first content is used and staged
///    under its own name, normally [`TFVARS_FILE_NAME`]);
/// 1. the admin kubeconfig, required to exist before the cluster is
///    considered complete but never read here.
pub struct Cluster<T, U> {
    tfvars: AssetId,
    kubeconfig: AssetId,
    terraform: T,
    templates: U,
}

impl<T: Terraform, U: TemplateUnpacker> Cluster<T, U> {
    pub fn new(tfvars: AssetId, kubeconfig: AssetId, terraform: T, templates: U) -> Self {
        Self {
            tfvars,
            kubeconfig,
            terraform,
            templates,
        }
    }

    /// Create the workspace and fill it with the variables file and the
    /// templates for its platform.
    async fn stage(&self, parents: &ParentStates<'_>) -> Result<TempDir, AssetError> {
        let vars = parents
            .require(self.tfvars, TFVARS)?
            .first()
            .ok_or(AssetError::EmptyParent { what: TFVARS })?;

        let workspace = tempfile::Builder::new()
            .prefix("clusterkit-")
            .tempdir()
            .map_err(AssetError::Workspace)?;

        write_private(&workspace.path().join(&vars.name), &vars.name, &vars.data).await?;

        let tfvars = TfVars::from_json(&vars.data).map_err(|source| AssetError::ParseVariables {
            name: vars.name.clone(),
            source,
        })?;
        let platform = tfvars.platform.as_str();

        self.templates
            .unpack(workspace.path(), platform)
            .map_err(|source| AssetError::Unpack {
                key: platform.to_string(),
                source,
            })?;
        self.templates
            .unpack(&workspace.path().join(CONFIG_TEMPLATE), CONFIG_TEMPLATE)
            .map_err(|source| AssetError::Unpack {
                key: CONFIG_TEMPLATE.to_string(),
                source,
            })?;

        debug!(workspace = %workspace.path().display(), %platform, "staged terraform workspace");
        Ok(workspace)
    }
}

#[async_trait(?Send)]
impl<T: Terraform, U: TemplateUnpacker> Asset for Cluster<T, U> {
    fn name(&self) -> String {
        "Cluster".to_string()
    }

    fn dependencies(&self) -> Vec<AssetId> {
        vec![self.tfvars, self.kubeconfig]
    }

    async fn generate(&self, parents: &ParentStates<'_>) -> Generation {
        let workspace = match self.stage(parents).await {
            Ok(workspace) => workspace,
            Err(err) => return Generation::failed(err),
        };

        info!("Using Terraform to create cluster...");

        if let Err(err) = self.terraform.init(workspace.path()).await {
            return Generation::failed(AssetError::TerraformInit(err));
        }
        debug!("terraform init finished");

        let applied = self.terraform.apply(workspace.path()).await;
        debug!(ok = applied.is_ok(), "terraform apply finished");

        let state_path = self.terraform.state_path(workspace.path());
        let read = tokio::fs::read(&state_path).await;
        let generation = reconcile(applied, &state_path, read);

        let workspace_path = workspace.path().to_path_buf();
        match workspace.close() {
            Ok(()) => generation,
            Err(source) => with_cleanup_error(
                generation,
                AssetError::RemoveWorkspace {
                    path: workspace_path,
                    source,
                },
            ),
        }
    }
}

/// Combine the apply outcome with the attempt to read its state file.
///
/// A readable state file is always returned, even after a failed apply, so
/// that partially created infrastructure can be inspected and destroyed.
fn reconcile(
    applied: anyhow::Result<()>,
    state_path: &Path,
    read: std::io::Result<Vec<u8>>,
) -> Generation {
    let to_state = |data: Vec<u8>| State::from(Content::new(STATE_FILE_NAME, data));
    match (applied, read) {
        (Ok(()), Ok(data)) => Generation::ok(to_state(data)),
        (Ok(()), Err(source)) => Generation::failed(AssetError::ReadState {
            path: state_path.to_path_buf(),
            source,
        }),
        (Err(err), Ok(data)) => Generation::partial(to_state(data), AssetError::TerraformApply(err)),
        (Err(err), Err(read_err)) => {
            error!(path = %state_path.display(), error = %read_err, "Failed to read tfstate");
            Generation::failed(AssetError::TerraformApply(err))
        }
    }
}

/// Fold a workspace removal failure into a finished generation without
/// displacing an earlier, more relevant error.
fn with_cleanup_error(generation: Generation, cleanup: AssetError) -> Generation {
    match generation.into_parts() {
        (Some(state), None) => Generation::partial(state, cleanup),
        (None, None) => Generation::failed(cleanup),
        (state, Some(primary)) => {
            warn!(error = %cleanup, "terraform workspace left behind");
            match state {
                Some(state) => Generation::partial(state, primary),
                None => Generation::failed(primary),
            }
        }
    }
}

/// Write `data` to `path` with owner-only permissions.
async fn write_private(path: &Path, name: &str, data: &[u8]) -> Result<(), AssetError> {
    let fail = |source| AssetError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    if !is_contained(name) {
        return Err(fail(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "file name escapes the workspace",
        )));
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(fail)?;
    }
    tokio::fs::write(path, data).await.map_err(fail)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(fail)?;
    }
    Ok(())
}
