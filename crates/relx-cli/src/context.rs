//! CLI context for shared state across commands.

use crate::output::Theme;
use anyhow::Context as _;
use relx_config::{ConfigLoader, ConfigSource, RelxConfig};
use std::path::PathBuf;
use tracing::{debug, info};

/// Global CLI context shared across all commands
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit configuration file from `--config`
    pub config_path: Option<PathBuf>,
    /// Quiet mode
    pub quiet: bool,
    /// Theme for stdout
    pub theme: Theme,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(args: &ContextArgs) -> Self {
        crate::output::init(args.no_ansi);

        Self {
            config_path: args.config.clone(),
            quiet: args.quiet,
            theme: crate::output::theme(),
        }
    }

    /// Loader honouring `--config`, `$RELX_CONFIG_FILE` and the default
    /// locations.
    pub fn config_loader(&self) -> ConfigLoader {
        ConfigLoader::new().with_cli_path(self.config_path.clone())
    }

    /// Load the configuration, falling back to defaults when no file exists.
    pub fn load_config(&self) -> anyhow::Result<RelxConfig> {
        load_config_with(&self.config_loader())
    }
}

fn load_config_with(loader: &ConfigLoader) -> anyhow::Result<RelxConfig> {
    let (config, source) = loader
        .resolve_or_default()
        .context("failed to load configuration")?;

    if source == ConfigSource::Defaults {
        info!("no configuration file found; using {source}");
    } else {
        debug!(source = %source, "configuration loaded");
    }
    Ok(config)
}

/// Arguments that affect context creation
#[derive(Debug, Clone, Default)]
pub struct ContextArgs {
    /// Configuration file
    pub config: Option<PathBuf>,
    /// Quiet mode
    pub quiet: bool,
    /// Disable ANSI colors
    pub no_ansi: bool,
}
