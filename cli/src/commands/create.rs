//! `clusterkit create` — build the asset graph for a target and resolve it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::application::assets::{Cluster, KeyPair, ProvidedFile, TFVARS_FILE_NAME};
use crate::application::ports::ConfigStore;
use crate::application::services::{AssetGraph, Resolver};
use crate::domain::AssetId;
use crate::infra::{DirectoryStore, EmbeddedTemplates, TerraformCli, TokioCommandRunner};
use crate::output::{OutputContext, TerminalReporter};

/// Targets that can be created.
#[derive(Subcommand)]
pub enum CreateCommand {
    /// Provision the cluster with Terraform and store its state
    Cluster(ClusterArgs),

    /// Generate the admin key pair under tls/
    KeyPair(KeyPairArgs),
}

/// Arguments for `create cluster`.
#[derive(Args)]
pub struct ClusterArgs {
    /// Terraform variables file (JSON, must set "platform"); staged as terraform.tfvars.json
    #[arg(long, value_name = "FILE")]
    pub tfvars: PathBuf,

    /// Admin kubeconfig that must exist before the cluster is created
    #[arg(long, value_name = "FILE")]
    pub kubeconfig: PathBuf,
}

/// Arguments for `create key-pair`.
#[derive(Args)]
pub struct KeyPairArgs {
    /// File name of the private key
    #[arg(long, value_name = "NAME", default_value = "admin.key")]
    pub private_key: String,

    /// File name of the public key
    #[arg(long, value_name = "NAME", default_value = "admin.pub")]
    pub public_key: String,
}

/// Build the graph needed for `cmd` and return it with the target's id.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or an asset
/// cannot be added to the graph.
pub fn plan(cmd: CreateCommand, config: &impl ConfigStore) -> Result<(AssetGraph, AssetId)> {
    let mut graph = AssetGraph::new();
    let target = match cmd {
        CreateCommand::Cluster(args) => {
            let config = config.load().context("failed to load configuration")?;
            let tfvars = graph.add(
                ProvidedFile::new("Terraform Variables", args.tfvars)
                    .with_content_name(TFVARS_FILE_NAME),
            )?;
            let kubeconfig = graph.add(ProvidedFile::new("Admin Kubeconfig", args.kubeconfig))?;
            let terraform =
                TerraformCli::from_config(TokioCommandRunner, &config.terraform);
            graph.add(Cluster::new(
                tfvars,
                kubeconfig,
                terraform,
                EmbeddedTemplates::default(),
            ))?
        }
        CreateCommand::KeyPair(args) => {
            graph.add(KeyPair::new(args.private_key, args.public_key))?
        }
    };
    Ok((graph, target))
}

/// Run `clusterkit create`, writing every generated asset under `dir`.
///
/// # Errors
///
/// Returns an error if planning fails, an asset fails to generate, or its
/// files cannot be written.
pub async fn run(
    ctx: &OutputContext,
    cmd: CreateCommand,
    dir: &Path,
    config: &impl ConfigStore,
) -> Result<()> {
    let (graph, target) = plan(cmd, config)?;
    let store = DirectoryStore::new(dir);
    let reporter = TerminalReporter::new(ctx);

    let mut resolver = Resolver::new(&graph);
    let state = resolver.resolve(target, &store, &reporter).await?;

    for content in state.contents() {
        ctx.path(&store.root().join(&content.name));
    }
    Ok(())
}
