//! Final artifact filtering.

use relx_core::PatternSet;
use std::collections::BTreeSet;
use tracing::debug;

/// Merge artifact names, keep those matching any of `patterns`, and return
/// them deduplicated in ascending byte order.
///
/// No patterns keep everything.
pub fn aggregate<I, S>(artifacts: I, patterns: &[S]) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    S: AsRef<str>,
{
    aggregate_with(artifacts, &PatternSet::new(patterns))
}

/// [`aggregate`] with a pre-compiled pattern set.
pub fn aggregate_with<I>(artifacts: I, patterns: &PatternSet) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let unique: BTreeSet<String> = if patterns.is_empty() {
        artifacts.into_iter().collect()
    } else {
        artifacts
            .into_iter()
            .filter(|name| patterns.is_match(name))
            .collect()
    };

    debug!(count = unique.len(), "artifacts after final filter");
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn no_patterns_keeps_all_sorted_unique() {
        let out = aggregate(names(&["b.iso", "a.json", "b.iso", "C.iso"]), &[] as &[&str]);
        assert_eq!(out, ["C.iso", "a.json", "b.iso"]);
    }

    #[test]
    fn keeps_names_matching_any_pattern() {
        let out = aggregate(
            names(&["x.iso", "x.json", "y.qcow2", "x.iso"]),
            &["*.iso", "*.qcow2"],
        );
        assert_eq!(out, ["x.iso", "y.qcow2"]);
    }

    #[test]
    fn invalid_patterns_never_match() {
        let out = aggregate(names(&["x.iso", "[bad"]), &["[bad", "*.iso"]);
        assert_eq!(out, ["x.iso"]);
    }

    #[test]
    fn only_invalid_patterns_keep_nothing() {
        let out = aggregate(names(&["x.iso"]), &["[bad"]);
        assert!(out.is_empty());
    }

    #[test]
    fn order_independent() {
        let patterns = PatternSet::new(["*.report"]);
        let forward = aggregate_with(names(&["b.report", "a.report", "c.txt"]), &patterns);
        let backward = aggregate_with(names(&["c.txt", "a.report", "b.report"]), &patterns);
        assert_eq!(forward, backward);
        assert_eq!(forward, ["a.report", "b.report"]);
    }
}
