//! Content fingerprints and per-entry digest results.

use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length in bytes of a fingerprint (a SHA-1 digest).
pub const FINGERPRINT_LEN: usize = 20;

/// Fixed-length content fingerprint of a file or directory tree.
///
/// Serializes as its lower-case hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Fingerprint(pub [u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Create a fingerprint from raw digest bytes.
    pub fn new(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Lower-case hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a fingerprint from its hex rendering.
    pub fn from_hex(s: &str) -> Result<Self, ParseFingerprintError> {
        let mut bytes = [0u8; FINGERPRINT_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseFingerprintError {
            input: s.to_string(),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.to_hex()
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = ParseFingerprintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

/// Error returned when a string is not a valid fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid fingerprint: {input:?}")]
pub struct ParseFingerprintError {
    input: String,
}

/// Name and digest of one directory entry.
///
/// `fingerprint` is `None` for entries that are neither regular files nor
/// directories; the name still takes part in the parent's digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub name: OsString,
    pub fingerprint: Option<Fingerprint>,
}

impl FileResult {
    pub fn new(name: impl Into<OsString>, fingerprint: Option<Fingerprint>) -> Self {
        Self {
            name: name.into(),
            fingerprint,
        }
    }

    /// Name bytes used for ordering and hashing.
    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_encoded_bytes()
    }
}
