//! Shell-glob name matching.
//!
//! Patterns follow POSIX shell globbing: `*` matches any run of characters,
//! `?` a single character and `[...]` / `[!...]` a character class. Neither
//! `*` nor `?` crosses a `/`, so `000product:*` matches
//! `000product:sles` but not `000product:sles/x86_64`.
//!
//! Lists of patterns are evaluated in declaration order and the first match
//! wins; callers rely on this when patterns overlap.
//!
//! There is no recursive `**`: a run of stars is a single `*`, so `pkg**`
//! behaves like `pkg*` and `**.iso` never matches `a/b.iso`.

use glob::{MatchOptions, Pattern};
use thiserror::Error;
use tracing::warn;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A glob pattern that could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid pattern '{pattern}' at position {position}: {reason}")]
pub struct PatternError {
    /// The offending pattern.
    pub pattern: String,
    /// Character offset of the problem.
    pub position: usize,
    /// Parser message.
    pub reason: String,
}

/// Collapse runs of `*`, which the glob crate would read as a recursive
/// wildcard.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    Pattern::new(&collapse_stars(pattern)).map_err(|e| PatternError {
        pattern: pattern.to_string(),
        position: e.pos,
        reason: e.msg.to_string(),
    })
}

/// Match a single name against a single pattern.
///
/// # Errors
/// Returns [`PatternError`] when the pattern is malformed.
pub fn matches(name: &str, pattern: &str) -> Result<bool, PatternError> {
    Ok(compile(pattern)?.matches_with(name, MATCH_OPTIONS))
}

/// Return the first pattern in `patterns` that matches `name`.
///
/// Malformed patterns are logged and treated as non-matching.
pub fn match_any<'a, I>(name: &str, patterns: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    patterns.into_iter().find(|pattern| match matches(name, pattern) {
        Ok(matched) => matched,
        Err(e) => {
            warn!(pattern = %pattern, error = %e, "invalid pattern in config");
            false
        }
    })
}

/// An ordered list of pre-compiled patterns.
///
/// Malformed patterns are reported once, when the set is built, and then never
/// match.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    entries: Vec<(String, Option<Pattern>)>,
}

impl PatternSet {
    /// Compile `patterns`, keeping their declaration order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = patterns
            .into_iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let compiled = match compile(raw) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        warn!(pattern = %raw, error = %e, "invalid pattern in config");
                        None
                    }
                };
                (raw.to_string(), compiled)
            })
            .collect();

        Self { entries }
    }

    /// Number of patterns, including malformed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no patterns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first pattern matching `name`.
    #[must_use]
    pub fn first_match(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(_, compiled)| {
            compiled
                .as_ref()
                .is_some_and(|p| p.matches_with(name, MATCH_OPTIONS))
        })
    }

    /// Text of the first pattern matching `name`.
    #[must_use]
    pub fn match_any(&self, name: &str) -> Option<&str> {
        self.first_match(name).map(|i| self.entries[i].0.as_str())
    }

    /// Whether any pattern matches `name`.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.first_match(name).is_some()
    }

    /// Patterns that failed to compile.
    pub fn invalid(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, compiled)| compiled.is_none())
            .map(|(raw, _)| raw.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_and_question_mark() {
        assert!(matches("x.iso", "*.iso").unwrap());
        assert!(!matches("x.json", "*.iso").unwrap());
        assert!(matches("pkg_a1", "pkg_a?").unwrap());
        assert!(!matches("pkg_a12", "pkg_a?").unwrap());
    }

    #[test]
    fn character_classes() {
        assert!(matches("repo1", "repo[0-9]").unwrap());
        assert!(!matches("repoX", "repo[0-9]").unwrap());
        assert!(matches("repoX", "repo[!0-9]").unwrap());
    }

    #[test]
    fn star_does_not_cross_separator() {
        assert!(matches("000product:sles", "000product:*").unwrap());
        assert!(!matches("standard/x86_64", "standard*").unwrap());
    }

    #[test]
    fn double_star_is_a_plain_star() {
        assert!(matches("pkg_a1", "pkg**").unwrap());
        assert!(matches("x.iso", "***.iso").unwrap());
        assert!(!matches("a/b.iso", "**").unwrap());
        assert!(!matches("a/b.iso", "**.iso").unwrap());
        assert!(!matches("a/b/c.iso", "**/*.iso").unwrap());
        assert!(matches("a/b.iso", "**/*.iso").unwrap());
    }

    #[test]
    fn double_star_in_set_is_valid() {
        let set = PatternSet::new(["pkg**"]);
        assert_eq!(set.invalid().count(), 0);
        assert!(set.is_match("pkg_b"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!matches("SLES", "sles").unwrap());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = matches("anything", "[abc").unwrap_err();
        assert_eq!(err.pattern, "[abc");
    }

    #[test]
    fn match_any_is_first_match_wins() {
        let patterns = ["*.report", "SLE-*", "*"];
        assert_eq!(
            match_any("SLE-INSTALLER.report", patterns),
            Some("*.report")
        );
        assert_eq!(match_any("SLE-INSTALLER.iso", patterns), Some("SLE-*"));
        assert_eq!(match_any("other", patterns), Some("*"));
    }

    #[test]
    fn match_any_skips_invalid_patterns() {
        assert_eq!(match_any("x.iso", ["[abc", "*.iso"]), Some("*.iso"));
        assert_eq!(match_any("x.iso", ["[abc"]), None);
    }

    #[test]
    fn match_any_empty_list_never_matches() {
        assert_eq!(match_any("x.iso", std::iter::empty()), None);
    }

    #[test]
    fn pattern_set_preserves_order() {
        let set = PatternSet::new(["000product*", "SLES_transactional:*", "*"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.first_match("000product-another"), Some(0));
        assert_eq!(set.first_match("SLES_transactional:self-install"), Some(1));
        assert_eq!(set.match_any("unrelated"), Some("*"));
    }

    #[test]
    fn pattern_set_reports_invalid_once() {
        let set = PatternSet::new(["[abc", "*.iso"]);
        assert_eq!(set.invalid().collect::<Vec<_>>(), vec!["[abc"]);
        assert!(set.is_match("x.iso"));
        assert!(!set.is_match("[abc"));
    }
}
