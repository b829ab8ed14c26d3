//! Configuration file discovery and loading.

use crate::error::{ConfigError, Result};
use crate::types::RelxConfig;
use crate::validate::Validator;
use directories::ProjectDirs;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "RELX_CONFIG_FILE";

/// File name looked up in the user and system configuration directories.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// System-wide configuration directory.
#[cfg(unix)]
pub const SYSTEM_CONFIG_DIR: &str = "/etc/relx";
/// System-wide configuration directory.
#[cfg(not(unix))]
pub const SYSTEM_CONFIG_DIR: &str = "C:\\ProgramData\\relx";

/// Where a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` command-line flag.
    Cli(PathBuf),
    /// [`CONFIG_ENV_VAR`].
    Env(PathBuf),
    /// User configuration directory.
    User(PathBuf),
    /// System configuration directory.
    System(PathBuf),
    /// Nothing found; built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// File backing this source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Cli(p) | Self::Env(p) | Self::User(p) | Self::System(p) => Some(p),
            Self::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli(p) => write!(f, "{} (--config)", p.display()),
            Self::Env(p) => write!(f, "{} (${CONFIG_ENV_VAR})", p.display()),
            Self::User(p) | Self::System(p) => write!(f, "{}", p.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Finds and loads the configuration file.
///
/// Locations are searched in order and the first existing file wins:
///
/// 1. the `--config` path
/// 2. `$RELX_CONFIG_FILE`
/// 3. `<user config dir>/relx/config.json`
/// 4. `/etc/relx/config.json`
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    cli_path: Option<PathBuf>,
    env_path: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    system_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader reading the environment and the platform's standard directories.
    #[must_use]
    pub fn new() -> Self {
        let env_path = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let user_dir =
            ProjectDirs::from("", "", "relx").map(|dirs| dirs.config_dir().to_path_buf());

        Self {
            cli_path: None,
            env_path,
            user_dir,
            system_dir: Some(PathBuf::from(SYSTEM_CONFIG_DIR)),
        }
    }

    /// Loader that only consults explicitly provided locations.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the `--config` path.
    #[must_use]
    pub fn with_cli_path(mut self, path: Option<PathBuf>) -> Self {
        self.cli_path = path;
        self
    }

    /// Override the environment-provided path.
    #[must_use]
    pub fn with_env_path(mut self, path: Option<PathBuf>) -> Self {
        self.env_path = path;
        self
    }

    /// Override the user configuration directory.
    #[must_use]
    pub fn with_user_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_dir = dir;
        self
    }

    /// Override the system configuration directory.
    #[must_use]
    pub fn with_system_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.system_dir = dir;
        self
    }

    /// Candidate sources in search order.
    #[must_use]
    pub fn candidates(&self) -> Vec<ConfigSource> {
        let mut candidates = Vec::with_capacity(4);
        if let Some(p) = &self.cli_path {
            candidates.push(ConfigSource::Cli(p.clone()));
        }
        if let Some(p) = &self.env_path {
            candidates.push(ConfigSource::Env(p.clone()));
        }
        if let Some(d) = &self.user_dir {
            candidates.push(ConfigSource::User(d.join(CONFIG_FILE_NAME)));
        }
        if let Some(d) = &self.system_dir {
            candidates.push(ConfigSource::System(d.join(CONFIG_FILE_NAME)));
        }
        candidates
    }

    /// First candidate whose file exists.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] when no candidate exists.
    pub fn find(&self) -> Result<ConfigSource> {
        let candidates = self.candidates();

        for candidate in &candidates {
            if let Some(path) = candidate.path() {
                if path.is_file() {
                    debug!(source = %candidate, "found config file");
                    return Ok(candidate.clone());
                }
                debug!(path = %path.display(), "config file not present");
            }
        }

        Err(ConfigError::NotFound {
            searched: candidates
                .iter()
                .filter_map(|c| c.path().map(Path::to_path_buf))
                .collect(),
        })
    }

    /// Find, load and validate the configuration.
    ///
    /// # Errors
    /// Returns error if no file exists, or the file found cannot be read,
    /// parsed or validated.
    pub fn resolve(&self) -> Result<(RelxConfig, ConfigSource)> {
        let source = self.find()?;
        let path = source.path().ok_or_else(|| ConfigError::NotFound {
            searched: Vec::new(),
        })?;
        let config = load_file(path)?;
        Ok((config, source))
    }

    /// Like [`ConfigLoader::resolve`], falling back to defaults when no file
    /// exists. Unreadable or invalid files are still errors.
    ///
    /// # Errors
    /// Returns error if the file found cannot be read, parsed or validated.
    pub fn resolve_or_default(&self) -> Result<(RelxConfig, ConfigSource)> {
        match self.resolve() {
            Err(e) if e.is_not_found() => Ok((RelxConfig::default(), ConfigSource::Defaults)),
            other => other,
        }
    }
}

/// Load, normalize and validate a configuration file.
///
/// Validation warnings are logged; validation errors fail the load.
///
/// # Errors
/// Returns error if the file cannot be read, parsed or validated.
pub fn load_file(path: &Path) -> Result<RelxConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, &e))?;
    parse_str(&content).map_err(|e| match e {
        ConfigError::Parse { message, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        },
        other => other,
    })
}

/// Parse, normalize and validate configuration JSON.
///
/// # Errors
/// Returns error if the JSON is malformed or fails validation.
pub fn parse_str(content: &str) -> Result<RelxConfig> {
    let config: RelxConfig = sonic_rs::from_str(content).map_err(|e| ConfigError::Parse {
        path: PathBuf::new(),
        message: e.to_string(),
    })?;
    let config = config.normalized();

    let result = Validator::new().validate(&config);
    for issue in result.warnings() {
        warn!(field = %issue.field, "{}", issue.message);
    }
    result.into_result()?;

    Ok(config)
}
