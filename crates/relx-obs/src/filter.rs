//! Package selection.

use relx_core::{EmptyFilterPolicy, FilteredPackages, PackageFilterRule, PatternSet};
use tracing::{debug, info};

/// Select packages by the first rule whose pattern matches.
///
/// Each selected package maps to the repository of its matching rule.
/// Packages matching no rule are dropped. No rules select nothing.
pub fn filter_packages<S: AsRef<str>>(
    packages: &[S],
    rules: &[PackageFilterRule],
) -> FilteredPackages {
    filter_packages_with_policy(packages, rules, EmptyFilterPolicy::Skip)
}

/// [`filter_packages`] with an explicit policy for an empty rule list.
pub fn filter_packages_with_policy<S: AsRef<str>>(
    packages: &[S],
    rules: &[PackageFilterRule],
    policy: EmptyFilterPolicy,
) -> FilteredPackages {
    let names = packages
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty());

    if rules.is_empty() {
        return match policy {
            EmptyFilterPolicy::Skip => {
                info!("no package filter patterns configured, no packages to process");
                FilteredPackages::new()
            }
            EmptyFilterPolicy::IncludeAll => names
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        };
    }

    let patterns = PatternSet::new(rules.iter().map(|r| r.pattern.as_str()));
    let mut selected = FilteredPackages::new();

    for name in names {
        if selected.contains_key(name) {
            continue;
        }
        if let Some(idx) = patterns.first_match(name) {
            let rule = &rules[idx];
            debug!(package = %name, rule = %rule, "package selected");
            selected.insert(name.to_string(), rule.repository.clone());
        }
    }

    selected
}
