//! SHA-256 digest newtype and file hashing.
//!
//! The wheel driver records a digest for every archived file; the
//! round-trip checks recompute and compare them. Digests are stored as
//! 64-character lowercase hexadecimal strings.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// Errors arising from digest parsing or computation.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The value is not a 64-character lowercase hex string.
    #[error("invalid SHA-256 digest: {reason}")]
    Invalid {
        /// Description of the validation failure.
        reason: String,
    },

    /// The file to digest could not be read.
    #[error("cannot digest file: {0}")]
    Io(#[from] std::io::Error),
}

/// A validated hex-encoded SHA-256 digest string.
///
/// # Examples
///
/// ```
/// use baler::digest::Sha256Digest;
///
/// let digest = Sha256Digest::of_bytes(b"");
/// assert_eq!(digest.as_str().len(), 64);
/// assert!(digest.as_str().starts_with("e3b0c442"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Digest a byte slice.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(format!("{:x}", Sha256::digest(bytes)))
    }

    /// Digest the file at `path`, reading it in chunks.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Io`] if the file cannot be read.
    pub fn of_file(path: &Path) -> Result<Self, DigestError> {
        let mut file = std::fs::File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for Sha256Digest {
    type Error = DigestError;

    fn try_from(value: &str) -> Result<Self, DigestError> {
        validate_digest(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl AsRef<str> for Sha256Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed hex-encoded SHA-256 digest.
fn validate_digest(value: &str) -> Result<(), DigestError> {
    if value.len() != DIGEST_HEX_LEN {
        return Err(DigestError::Invalid {
            reason: format!(
                "expected {DIGEST_HEX_LEN} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !c.is_ascii_hexdigit() || c.is_ascii_uppercase())
    {
        return Err(DigestError::Invalid {
            reason: format!("invalid character '{bad}'"),
        });
    }
    Ok(())
}
