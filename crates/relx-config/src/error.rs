//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file in any searched location.
    #[error("no configuration file found (searched: {})", display_paths(.searched))]
    NotFound {
        /// Locations that were checked.
        searched: Vec<PathBuf>,
    },

    /// Configuration file could not be read.
    #[error("failed to read config file {path}: {message}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Configuration file is not valid JSON for the expected model.
    #[error("failed to parse config file {path}: {message}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an IO error with context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Whether the error only means no file exists.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_lists_searched_paths() {
        let err = ConfigError::NotFound {
            searched: vec![
                PathBuf::from("/home/u/.config/relx/config.json"),
                PathBuf::from("/etc/relx/config.json"),
            ],
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "no configuration file found (searched: /home/u/.config/relx/config.json, /etc/relx/config.json)"
        );
    }
}
