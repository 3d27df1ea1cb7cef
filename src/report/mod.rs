//! Aggregation and rendering of scan results.
//!
//! - this module — license frequency counts and the missing-package tally.
//! - [`terminal`] — fixed-width, dot-padded text output for list and summary
//!   modes, colored only when the [`RenderConfig`](crate::config::RenderConfig)
//!   asks for it.

use indexmap::IndexMap;

use crate::models::PackageRecord;

pub mod terminal;

/// Count how many packages carry each license, most common first.
///
/// A package with several licenses counts once towards each. Equal counts keep
/// the order in which the licenses were first seen.
pub fn count_licenses(records: &[PackageRecord]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for license in records.iter().flat_map(|r| &r.all_licenses) {
        *counts.entry(license.clone()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Number of packages reported as `missing`.
pub fn missing_count(records: &[PackageRecord]) -> usize {
    records.iter().filter(|r| r.is_missing()).count()
}
