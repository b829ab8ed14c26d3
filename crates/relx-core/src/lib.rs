//! Core types and utilities shared by the relx crates.
//!
//! - [`pattern`]: shell-glob matching with first-match-wins lists
//! - [`package`]: package filter rules and the filtered package set

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod package;
pub mod pattern;

pub use package::{EmptyFilterPolicy, FilteredPackages, PackageFilterRule};
pub use pattern::{PatternError, PatternSet, match_any, matches};
