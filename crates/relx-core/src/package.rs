//! Package filter rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Packages selected for binary enumeration, keyed by package name, valued by
/// the repository to list binaries from. An empty repository means the build
/// service's default.
pub type FilteredPackages = BTreeMap<String, String>;

/// What an empty list of package filter rules selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyFilterPolicy {
    /// No rules select no packages.
    #[default]
    Skip,
    /// No rules select every package, listed from the default repository.
    IncludeAll,
}

/// Associates a package-name glob with the repository its binaries are
/// listed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageFilterRule {
    /// Glob matched against package names.
    pub pattern: String,
    /// Target repository for matching packages.
    #[serde(default)]
    pub repository: String,
}

impl PackageFilterRule {
    /// Create a new rule.
    #[must_use]
    pub fn new(pattern: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            repository: repository.into(),
        }
    }
}

impl std::fmt::Display for PackageFilterRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.repository.is_empty() {
            write!(f, "{}", self.pattern)
        } else {
            write!(f, "{} -> {}", self.pattern, self.repository)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_deserializes_without_repository() {
        let rule: PackageFilterRule = sonic_rs::from_str(r#"{"pattern": "pkg_*"}"#).unwrap();
        assert_eq!(rule, PackageFilterRule::new("pkg_*", ""));
    }

    #[test]
    fn empty_filter_policy_names() {
        let policy: EmptyFilterPolicy = sonic_rs::from_str(r#""include-all""#).unwrap();
        assert_eq!(policy, EmptyFilterPolicy::IncludeAll);
        assert_eq!(EmptyFilterPolicy::default(), EmptyFilterPolicy::Skip);
    }

    #[test]
    fn rule_display() {
        assert_eq!(
            PackageFilterRule::new("000product*", "repo1").to_string(),
            "000product* -> repo1"
        );
        assert_eq!(PackageFilterRule::new("pkg_*", "").to_string(), "pkg_*");
    }
}
