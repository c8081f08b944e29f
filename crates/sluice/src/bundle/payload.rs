//! Bundle payload shapes shared by both transport formats

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One list file inside a JSON bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonListEntry {
    /// Path of the list file relative to the store root
    pub path:    String,
    /// Full text of the list file
    #[serde(default)]
    pub content: String,
}

/// The JSON form of an exported bundle
///
/// Unknown fields are ignored on import so older and newer payloads stay
/// exchangeable. Sections are keyed in a `BTreeMap` so exports are
/// byte-stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonBundle {
    /// Verbatim text of the list index
    #[serde(default)]
    pub index: String,
    /// List files keyed by their index section
    #[serde(default)]
    pub files: BTreeMap<String, JsonListEntry>,
}

/// A finished export ready to hand to a caller
#[derive(Debug, Clone)]
pub struct ExportBundle {
    /// Suggested download file name
    pub filename:     &'static str,
    /// Encoded bundle bytes
    pub content:      Vec<u8>,
    /// MIME type matching the encoding
    pub content_type: &'static str,
}

/// Counts of what an import actually wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Whether the list index was replaced
    pub index_written: bool,
    /// Number of list files written under the store root
    pub files_written: usize,
}
