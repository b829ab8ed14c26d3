//! CLI commands for relx.

pub mod artifact;

use crate::context::ContextArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// relx - release tooling for Open Build Service projects
#[derive(Parser, Debug)]
#[command(name = "relx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (overrides $RELX_CONFIG_FILE and the default locations)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    pub no_ansi: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Arguments that shape the shared command context.
    pub fn to_context_args(&self) -> ContextArgs {
        ContextArgs {
            config: self.config.clone(),
            quiet: self.quiet,
            no_ansi: self.no_ansi,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the build artifacts of an OBS project
    #[command(alias = "artifacts")]
    Artifact(artifact::ArtifactArgs),
}
