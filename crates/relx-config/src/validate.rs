//! Configuration validation.

use crate::error::{ConfigError, Result};
use crate::types::RelxConfig;
use relx_core::pattern;
use std::fmt;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Reported, loading continues.
    Warning,
    /// Loading fails.
    Error,
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity.
    pub severity: Severity,
    /// Offending key, e.g. `binary_filter_patterns[2]`.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn push(&mut self, severity: Severity, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            severity,
            field: field.into(),
            message: message.into(),
        });
    }

    /// All issues in discovery order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Issues of error severity.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Issues of warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Whether any error was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Fail when errors were found.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] listing every error.
    pub fn into_result(self) -> Result<()> {
        if !self.has_errors() {
            return Ok(());
        }
        let message = self
            .errors()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(message))
    }
}

/// Checks a [`RelxConfig`] for values the pipeline cannot use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validate `config`.
    #[must_use]
    pub fn validate(&self, config: &RelxConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        if config.max_concurrent_lookups == 0 {
            result.push(
                Severity::Error,
                "max_concurrent_lookups",
                "must be at least 1",
            );
        }

        if config.osc_command.trim().is_empty() {
            result.push(Severity::Error, "osc_command", "must not be empty");
        }

        if !config.obs_api_url.is_empty()
            && !config.obs_api_url.starts_with("https://")
            && !config.obs_api_url.starts_with("http://")
        {
            result.push(
                Severity::Warning,
                "obs_api_url",
                format!("'{}' is not an http(s) URL", config.obs_api_url),
            );
        }

        for (i, rule) in config.package_filter_patterns.iter().enumerate() {
            let field = format!("package_filter_patterns[{i}]");
            if rule.pattern.is_empty() {
                result.push(Severity::Warning, field, "empty pattern never matches");
            } else if let Err(e) = pattern::matches("", &rule.pattern) {
                result.push(Severity::Warning, field, e.to_string());
            }
        }

        for (i, raw) in config.binary_filter_patterns.iter().enumerate() {
            if let Err(e) = pattern::matches("", raw) {
                result.push(
                    Severity::Warning,
                    format!("binary_filter_patterns[{i}]"),
                    e.to_string(),
                );
            }
        }

        result
    }
}
