//! Fixed file names and bundle identifiers used across the crate.

/// File name of the list index inside the store root.
pub const INDEX_FILE_NAME: &str = "lists.ini";

/// Index key declaring a section's list file, matched case-insensitively.
pub const INDEX_PATH_KEY: &str = "listfilename";

/// Redundant leading path segment stripped from relative paths.
pub const ROOT_PREFIX: &str = "config";

/// File name of the suggestion list inside the store root.
pub const SUGGESTIONS_FILE_NAME: &str = "suggestions.txt";

/// Download file name for binary bundle exports.
pub const ARCHIVE_BUNDLE_FILE_NAME: &str = "lists.slb";

/// Download file name for JSON bundle exports.
pub const JSON_BUNDLE_FILE_NAME: &str = "lists.json";

/// Content type attached to binary bundle exports.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type attached to JSON bundle exports.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Magic bytes opening a binary bundle container.
pub const ARCHIVE_MAGIC: &[u8; 4] = b"SLBF";

/// Current binary container version.
pub const ARCHIVE_VERSION: u8 = 1;
