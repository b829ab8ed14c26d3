//! Artifact command implementation.

use crate::context::Context;
use crate::output::{self, Theme};
use anyhow::{Context as _, Result, anyhow};
use clap::{Args, ValueEnum};
use relx_config::RelxConfig;
use relx_core::EmptyFilterPolicy;
use relx_obs::{ArtifactPipeline, OscClient, PipelineOptions};
use relx_platform::{ProcessRunner, shutdown_token};
use serde::Serialize;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Output format for the artifact list.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable list
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Arguments for the artifact command.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// OBS project to search
    #[arg(short, long)]
    pub project: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum number of simultaneous binary lookups
    #[arg(long, value_name = "N", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: Option<usize>,

    /// Per-call timeout in seconds for osc
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Serialize)]
struct ArtifactReport<'a> {
    project: &'a str,
    artifacts: &'a [String],
}

/// Run the artifact command.
pub async fn run(args: ArtifactArgs, ctx: &Context) -> Result<ExitCode> {
    info!(project = %args.project, "running artifact command");

    let config = ctx.load_config()?;
    if config.package_filter_patterns.is_empty()
        && config.empty_package_filter == EmptyFilterPolicy::Skip
        && !ctx.quiet
    {
        output::warning(
            "no package_filter_patterns configured; set them in the relx configuration file",
        );
    }

    let client = OscClient::new(Arc::new(ProcessRunner::new()))
        .with_program(config.osc_command.as_str())
        .with_api_url(config.obs_api_url.as_str());
    let pipeline = ArtifactPipeline::with_osc(client, pipeline_options(&config, &args));

    let cancel = shutdown_token();
    let result = pipeline.list_artifacts(&cancel, &args.project).await;
    cancel.cancel();

    // Rendered without the source chain: the pipeline's messages already
    // carry their causes.
    let artifacts = result.map_err(|e| {
        anyhow!(
            "failed to list artifacts for project {}: {e}",
            args.project
        )
    })?;

    let rendered = match args.format {
        OutputFormat::Text => render_text(&ctx.theme, &args.project, &artifacts),
        OutputFormat::Json => render_json(&args.project, &artifacts)?,
    };
    println!("{rendered}");

    Ok(ExitCode::SUCCESS)
}

/// Pipeline options from the configuration, with command-line overrides.
fn pipeline_options(config: &RelxConfig, args: &ArtifactArgs) -> PipelineOptions {
    let timeout = match args.timeout {
        Some(secs) if secs > 0 => Duration::from_secs(secs),
        _ => config.operation_timeout(),
    };

    PipelineOptions::default()
        .with_package_rules(config.package_filter_patterns.clone())
        .with_binary_patterns(config.binary_filter_patterns.iter().cloned())
        .with_concurrency_limit(args.concurrency.unwrap_or(config.max_concurrent_lookups))
        .with_operation_timeout(timeout)
        .with_empty_filter_policy(config.empty_package_filter)
}

fn render_text(theme: &Theme, project: &str, artifacts: &[String]) -> String {
    if artifacts.is_empty() {
        return theme.dim(&format!("No artifacts found for project '{project}'."));
    }

    let mut out = theme.header(&format!("Artifacts for project '{}':", theme.project(project)));
    for artifact in artifacts {
        out.push('\n');
        out.push_str(&theme.artifact(artifact));
    }
    out
}

fn render_json(project: &str, artifacts: &[String]) -> Result<String> {
    sonic_rs::to_string_pretty(&ArtifactReport { project, artifacts })
        .context("failed to serialize artifact list")
}
