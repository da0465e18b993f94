//! Checksum computation for downloaded objects.
//!
//! APT verifies every downloaded artifact against its index, so the `URI
//! Done` message carries hex-encoded MD5, SHA-1, SHA-256, and SHA-512
//! digests. Digests are computed over the bytes read back from the written
//! file rather than the in-flight stream: what matters is what landed on
//! disk.

use std::path::Path;

use digest::Digest;

/// Hex-encoded digests of one downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    /// Hex-encoded MD5 digest.
    pub md5: String,
    /// Hex-encoded SHA-1 digest.
    pub sha1: String,
    /// Hex-encoded SHA-256 digest.
    pub sha256: String,
    /// Hex-encoded SHA-512 digest.
    pub sha512: String,
}

impl FileDigests {
    /// Compute all four digests over a byte slice.
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self {
            md5: hex::encode(md5::Md5::digest(data)),
            sha1: hex::encode(sha1::Sha1::digest(data)),
            sha256: hex::encode(sha2::Sha256::digest(data)),
            sha512: hex::encode(sha2::Sha512::digest(data)),
        }
    }

    /// Read the file at `path` back from disk and digest its contents.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be read.
    pub async fn from_file(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        Ok(Self::compute(&data))
    }
}
