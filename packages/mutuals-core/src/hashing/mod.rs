//! # Hashing Module
//!
//! One-way digests of normalized contact identifiers and the local hash set
//! built from them.
//!
//! ## Digest Scheme
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         IDENTIFIER DIGEST                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  RawIdentifier ──► normalize() ──► UTF-8 bytes                         │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                      SHA-2( [salt ||] normalized_bytes )               │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                      lowercase hex  ──► HashValue                      │
//! │                                                                         │
//! │  SHA-256 (default) → 64 hex chars                                      │
//! │  SHA-384           → 96 hex chars                                      │
//! │  SHA-512           → 128 hex chars                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both parties must use the same algorithm and salt, otherwise no hash will
//! ever match. The unsalted SHA-256 default is what the mobile app shipped.
//!
//! ## Security Considerations
//!
//! Phone numbers have little entropy. An unsalted digest of one can be
//! inverted by enumerating the number space, so a hash list shared in the
//! clear reveals the numbers it was built from to anyone willing to try.
//! A shared salt raises the cost of precomputed tables but does not stop
//! enumeration by someone who knows the salt.

mod set;

pub use set::{build_hash_set, build_hash_set_concurrent, LocalHashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::contacts::RawIdentifier;
use crate::error::{Error, Result};
use crate::normalize::{normalize, NormalizedIdentifier};

/// Supported one-way digest algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// SHA-256, 32-byte output
    #[default]
    Sha256,
    /// SHA-384, 48-byte output
    Sha384,
    /// SHA-512, 64-byte output
    Sha512,
}

impl DigestAlgorithm {
    /// Get the algorithm name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Length of the hex encoding produced by this algorithm.
    pub fn hex_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 64,
            DigestAlgorithm::Sha384 => 96,
            DigestAlgorithm::Sha512 => 128,
        }
    }

    /// Digest `data`, prefixed by `salt` if present, as lowercase hex.
    pub fn hex_digest(&self, salt: Option<&[u8]>, data: &[u8]) -> String {
        match self {
            DigestAlgorithm::Sha256 => hex_digest_with::<Sha256>(salt, data),
            DigestAlgorithm::Sha384 => hex_digest_with::<Sha384>(salt, data),
            DigestAlgorithm::Sha512 => hex_digest_with::<Sha512>(salt, data),
        }
    }
}

fn hex_digest_with<D: Digest>(salt: Option<&[u8]>, data: &[u8]) -> String {
    let mut hasher = D::new();
    if let Some(salt) = salt {
        hasher.update(salt);
    }
    hasher.update(data);
    hex::encode(hasher.finalize())
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha384" => Ok(DigestAlgorithm::Sha384),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(Error::UnsupportedDigest(s.to_string())),
        }
    }
}

/// Hex-encoded digest of a normalized identifier.
///
/// Compared by exact, case-sensitive string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(String);

impl HashValue {
    /// Accept a hash string produced elsewhere.
    ///
    /// Must be lowercase hex of a length one of the supported algorithms
    /// produces.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let known_len = [
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
        ]
        .iter()
        .any(|alg| alg.hex_len() == s.len());

        if !known_len {
            return Err(Error::InvalidArgument(format!(
                "hash has unexpected length {}",
                s.len()
            )));
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(Error::InvalidArgument(
                "hash must be lowercase hex".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    /// Hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HashValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for HashValue {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Digests identifiers with a fixed algorithm and optional salt.
#[derive(Debug, Clone, Default)]
pub struct IdentifierHasher {
    algorithm: DigestAlgorithm,
    salt: Option<Vec<u8>>,
}

impl IdentifierHasher {
    /// Create an unsalted hasher.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            salt: None,
        }
    }

    /// Prefix every digest input with `salt`. An empty salt means no salt.
    pub fn with_salt(mut self, salt: impl AsRef<[u8]>) -> Self {
        let salt = salt.as_ref();
        self.salt = (!salt.is_empty()).then(|| salt.to_vec());
        self
    }

    /// Algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Whether a salt is mixed into every digest.
    pub fn is_salted(&self) -> bool {
        self.salt.is_some()
    }

    /// Digest an already-normalized identifier.
    pub fn digest(&self, normalized: &NormalizedIdentifier) -> HashValue {
        HashValue(
            self.algorithm
                .hex_digest(self.salt.as_deref(), normalized.as_bytes()),
        )
    }

    /// Normalize then digest a raw identifier.
    pub fn hash_identifier(&self, raw: &RawIdentifier) -> HashValue {
        self.digest(&normalize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize_email, normalize_phone};

    #[test]
    fn test_sha256_known_vectors() {
        assert_eq!(
            DigestAlgorithm::Sha256.hex_digest(None, b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            DigestAlgorithm::Sha256.hex_digest(None, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_digest_lengths() {
        for alg in [
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
        ] {
            assert_eq!(alg.hex_digest(None, b"x").len(), alg.hex_len());
        }
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("sha256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("SHA-512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        let err = "md5".parse::<DigestAlgorithm>().unwrap_err();
        assert_eq!(err.code(), 200);
    }

    #[test]
    fn test_hash_consistency() {
        let hasher = IdentifierHasher::default();
        let a = hasher.digest(&normalize_phone("(555) 123-4567"));
        let b = hasher.digest(&normalize_phone("555 123 4567"));
        assert_eq!(a, b);

        let c = hasher.digest(&normalize_phone("555 123 4568"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_hash_matches_plain_sha256_of_normalized_text() {
        let hasher = IdentifierHasher::default();
        let hash = hasher.hash_identifier(&RawIdentifier::email("  Alice@Example.com  "));
        assert_eq!(
            hash.as_str(),
            DigestAlgorithm::Sha256.hex_digest(None, b"alice@example.com")
        );
    }

    #[test]
    fn test_salt_changes_digest() {
        let id = normalize_email("alice@example.com");
        let plain = IdentifierHasher::default().digest(&id);
        let salted = IdentifierHasher::default().with_salt("pepper").digest(&id);
        assert_ne!(plain, salted);
        assert_eq!(
            salted.as_str(),
            DigestAlgorithm::Sha256.hex_digest(None, b"pepperalice@example.com")
        );
    }

    #[test]
    fn test_empty_salt_is_no_salt() {
        let hasher = IdentifierHasher::default().with_salt("");
        assert!(!hasher.is_salted());
    }

    #[test]
    fn test_empty_identifier_still_hashes() {
        let hash = IdentifierHasher::default().digest(&normalize_phone("no digits"));
        assert_eq!(
            hash.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_value_parse() {
        let hash = IdentifierHasher::default().digest(&normalize_phone("5551234"));
        assert_eq!(HashValue::parse(hash.as_str()).unwrap(), hash);
        assert!(HashValue::parse("abc").is_err());
        assert!(HashValue::parse(&hash.as_str().to_uppercase()).is_err());
    }

    #[test]
    fn test_hash_value_serde_transparent() {
        let hash = IdentifierHasher::default().digest(&normalize_phone("1"));
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash));
    }
}
