//! Context identifiers and the line-oriented listings they come from.
//!
//! A context is `<project>.<build-type>+<target>`, e.g. `test.Debug+CM0`.
//! Identifiers are compared by exact string equality; the only other
//! operation on them is substring filtering.

use std::collections::HashSet;

/// Split raw tool output into lines, accepting both CRLF and LF endings
/// and dropping empty lines.
pub fn split_lines(output: &str) -> Vec<String> {
    output
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep entries containing `filter`, preserving order. An empty filter
/// keeps everything.
pub fn apply_filter(entries: Vec<String>, filter: &str) -> Vec<String> {
    if filter.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| entry.contains(filter))
        .collect()
}

/// Remove exact duplicates, keeping the first occurrence.
pub fn dedup_preserving_order(entries: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}
