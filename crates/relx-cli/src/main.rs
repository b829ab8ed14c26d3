//! relx CLI - release tooling for Open Build Service projects.
//!
//! `relx artifact -p <project>` lists the build artifacts a project
//! publishes, filtered by the package and binary patterns in the relx
//! configuration file.

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod context;
mod output;

use clap::Parser;
use commands::{Cli, Commands};
use context::Context;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 if cli.quiet => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_ansi)
        .without_time()
        .init();

    let ctx = Context::new(&cli.to_context_args());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            output::error(&format!("failed to start async runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_command(&cli, &ctx)) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run_command(cli: &Cli, ctx: &Context) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Artifact(args) => commands::artifact::run(args.clone(), ctx).await,
    }
}
