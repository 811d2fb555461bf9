//! Content Hash Value Object
//!
//! SHA-256 of a file's raw bytes, used to tell real edits apart from
//! touch/auto-save noise. Classification never looks at it.

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{SentinelError, SentinelResult};

/// Content hash value object
///
/// Stored as `sha256:<hex>` so hashes from different sources compare
/// consistently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Hash raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(format!("{}{:x}", Self::PREFIX, digest))
    }

    /// Read and hash a file.
    ///
    /// A missing file is `NotFound`; any other read failure is `Hash`.
    pub fn from_file(path: &Path) -> SentinelResult<Self> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Self::from_bytes(&bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SentinelError::NotFound {
                path: path.to_path_buf(),
            }),
            Err(e) => Err(SentinelError::Hash {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Combine several hashes into one, independent of input order
    pub fn combine<'a>(hashes: impl IntoIterator<Item = &'a ContentHash>) -> Self {
        let mut parts: Vec<&str> = hashes.into_iter().map(|h| h.as_str()).collect();
        parts.sort_unstable();
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update(b"\n");
        }
        Self(format!("{}{:x}", Self::PREFIX, hasher.finalize()))
    }

    /// Get the full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }

    /// First 12 hex characters, for display
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
