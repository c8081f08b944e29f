//! Path normalization and confinement primitives.

use tracing::debug;

use crate::{constants::ROOT_PREFIX, Result, SluiceError};

/// Strips one redundant leading `config/` (or `config\`) segment.
///
/// Indexes and bundles written against the store root sometimes include the
/// root folder name itself; one copy is dropped, nothing else is rewritten.
pub(crate) fn strip_root_prefix(rel: &str) -> &str {
    rel.strip_prefix(ROOT_PREFIX)
        .and_then(|rest| rest.strip_prefix(['/', '\\']))
        .unwrap_or(rel)
}

/// Normalizes a caller-supplied relative path for resolution under the root.
///
/// Separators become `/`, one leading `config/` segment is dropped, and any
/// occurrence of `..` rejects the path outright. The check is a substring
/// test, deliberately stricter than a per-segment walk, and runs before any
/// filesystem access. Leading separators are trimmed so absolute-looking
/// inputs re-anchor under the root.
pub(crate) fn normalize_relative(raw: &str) -> Result<String> {
    let unified = raw.replace('\\', "/");
    let rel = strip_root_prefix(&unified);
    if rel.contains("..") {
        debug!("Rejecting relative path containing '..': {:?}", raw);
        return Err(SluiceError::PathEscape {
            path: raw.to_owned(),
        });
    }
    Ok(rel.trim_start_matches('/').to_owned())
}

/// Checks whether a bundle entry name may be written as a list file.
///
/// Accepted names are `.txt` files built only from ASCII alphanumerics,
/// underscores, hyphens, dots, and forward slashes, with a non-empty stem.
pub(crate) fn is_allowed_archive_name(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".txt") else {
        return false;
    };
    if stem.is_empty() {
        return false;
    }
    for ch in stem.chars() {
        match ch {
            // Valid characters: alphanumeric, underscore, hyphen, dot, slash
            'a' ..= 'z' | 'A' ..= 'Z' | '0' ..= '9' | '_' | '-' | '.' | '/' => {},
            // Any other character is invalid
            _ => return false,
        }
    }
    true
}
