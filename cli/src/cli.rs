//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::infra::YamlConfigStore;
use crate::output::OutputContext;

/// Generate cluster assets and provision clusters with Terraform
#[derive(Parser)]
#[command(
    name = "clusterkit",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory generated assets are written to
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honored via `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log progress details to stderr (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an asset and everything it depends on
    #[command(subcommand)]
    Create(commands::create::CreateCommand),

    /// Show version
    Version(commands::version::VersionArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            dir,
            quiet,
            no_color,
            verbose: _,
            command,
        } = self;
        match command {
            Command::Version(args) => {
                commands::version::run(&args);
                Ok(())
            }
            Command::Create(cmd) => {
                let ctx = OutputContext::new(no_color, quiet);
                commands::create::run(&ctx, cmd, &dir, &YamlConfigStore::new()).await
            }
        }
    }
}
