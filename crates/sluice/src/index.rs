//! Tolerant parsing of the list index document.
//!
//! The index is section/key-value text. Each section names a logical list
//! and declares the relative path of its file through the `listFileName`
//! key, matched case-insensitively. Parsing never fails: malformed lines
//! are skipped, and thoroughly malformed text yields an empty reference
//! set.

use tracing::{debug, trace};

use crate::{constants::INDEX_PATH_KEY, validation::strip_root_prefix};

/// One list reference declared by the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Section name
    pub section: String,
    /// Relative path of the list file
    pub path:    String,
}

/// Extracts the ordered section-to-path references from index text.
///
/// Sections keep their first-appearance order; a section declared twice is
/// merged, and a repeated `listFileName` within a section keeps the last
/// value. Sections without the key, empty values, comments, and anything
/// that does not parse are skipped silently.
pub fn referenced_lists(text: &str) -> Vec<IndexEntry> {
    let mut entries: Vec<IndexEntry> = Vec::new();
    let mut current: Option<String> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            let name = line
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .unwrap_or("")
                .trim();
            current = if name.is_empty() {
                trace!("Skipping malformed section header: {}", line);
                None
            }
            else {
                Some(name.to_owned())
            };
            continue;
        }
        let Some(section) = current.as_deref() else {
            trace!("Skipping key outside any section: {}", line);
            continue;
        };
        let Some((key, value)) = line.split_once('=') else {
            trace!("Skipping malformed index line: {}", line);
            continue;
        };
        if !key.trim().eq_ignore_ascii_case(INDEX_PATH_KEY) {
            continue;
        }
        let rel = strip_root_prefix(unquote(value)).to_owned();
        if rel.is_empty() {
            debug!("Section '{}' declares an empty list file name", section);
            continue;
        }
        if let Some(entry) = entries.iter_mut().find(|entry| entry.section == section) {
            entry.path = rel;
        }
        else {
            entries.push(IndexEntry {
                section: section.to_owned(),
                path:    rel,
            });
        }
    }

    entries
}

/// Trims a value and removes one pair of matching surrounding quotes.
fn unquote(raw: &str) -> &str {
    let value = raw.trim();
    if let Some(inner) = value.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        return inner;
    }
    if let Some(inner) = value.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        return inner;
    }
    value
}
