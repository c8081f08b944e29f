//! Binary bundle container framing
//!
//! A container is four magic bytes, one version byte, a postcard-encoded
//! entry list, and a trailing little-endian CRC32 over the encoded list.

use crc32fast::Hasher as Crc32Hasher;
use serde::{Deserialize, Serialize};

use crate::constants::{ARCHIVE_MAGIC, ARCHIVE_VERSION};
use crate::error::{Result, SluiceError};

/// One named file carried inside a binary bundle container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Entry path relative to the store root
    pub name:    String,
    /// Raw file bytes
    pub content: Vec<u8>,
}

/// Serialize entries into the framed container format
pub fn to_bytes(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let body = postcard::to_stdvec(entries)
        .map_err(|e: postcard::Error| SluiceError::Serialization { reason: e.to_string() })?;
    let mut hasher = Crc32Hasher::new();
    hasher.update(&body);
    let checksum = hasher.finalize();

    let mut bytes = Vec::with_capacity(ARCHIVE_MAGIC.len() + 1 + body.len() + 4);
    bytes.extend_from_slice(ARCHIVE_MAGIC);
    bytes.push(ARCHIVE_VERSION);
    bytes.extend_from_slice(&body);
    bytes.extend_from_slice(&checksum.to_le_bytes());

    Ok(bytes)
}

/// Deserialize a framed container and verify its checksum
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let rest = bytes.strip_prefix(ARCHIVE_MAGIC).ok_or_else(|| SluiceError::InvalidArchive {
        reason: "missing container magic".to_string(),
    })?;
    let (version, rest) = rest.split_first().ok_or_else(|| SluiceError::InvalidArchive {
        reason: "missing container version".to_string(),
    })?;
    if *version != ARCHIVE_VERSION {
        return Err(SluiceError::InvalidArchive {
            reason: format!("unsupported container version {}", version),
        });
    }
    if rest.len() < 4 {
        return Err(SluiceError::InvalidArchive {
            reason: "container too short for checksum".to_string(),
        });
    }

    let body_len = rest.len() - 4;
    let body = &rest[.. body_len];
    let checksum_bytes = &rest[body_len ..];
    let expected_checksum = u32::from_le_bytes(checksum_bytes.try_into().unwrap());

    let mut hasher = Crc32Hasher::new();
    hasher.update(body);
    let actual_checksum = hasher.finalize();

    if actual_checksum != expected_checksum {
        return Err(SluiceError::InvalidArchive {
            reason: "container checksum mismatch".to_string(),
        });
    }

    postcard::from_bytes(body).map_err(|e: postcard::Error| SluiceError::InvalidArchive {
        reason: format!("container body is not decodable: {}", e),
    })
}
