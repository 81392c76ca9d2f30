//! # Discovery Module
//!
//! The hash-then-compare pipeline that finds which contacts also use the app.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        DISCOVERY PIPELINE                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Consent                                                            │
//! │     request_permission() ──► not Granted ──► Error::ConsentDenied      │
//! │            │                                 (nothing read or hashed)  │
//! │            ▼                                                           │
//! │  2. Read (bounded by read_timeout)                                     │
//! │     fetch_contacts() ──► timeout ──► Error::ContactReadTimeout         │
//! │            │                                                           │
//! │            ▼                                                           │
//! │  3. Flatten                                                            │
//! │     ContactRecord → RawIdentifier (entries without values skipped)     │
//! │            │                                                           │
//! │            ▼                                                           │
//! │  4. Hash (fan-out over `workers`, joined before returning)             │
//! │     normalize → digest → merge ──► LocalHashSet                        │
//! │            │                                                           │
//! │            ▼                                                           │
//! │  5. Compare (any number of times)                                      │
//! │     match_hashes(local, remote_text) ──► MatchResult                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Privacy Design
//!
//! 1. **Local only**: raw and normalized identifiers never leave the device
//! 2. **Ephemeral**: the hash set lives in memory for one session
//! 3. **No logging of contact data**: only counts and hashes are logged

pub mod config;
mod session;

pub use config::DiscoveryConfig;
pub use session::{DiscoverySession, SessionState};

use crate::contacts::{collect_identifiers, ContactSource};
use crate::error::{Error, Result};
use crate::hashing::{build_hash_set_concurrent, IdentifierHasher, LocalHashSet};

/// Runs the consent → read → hash pipeline against a contact source.
pub struct DiscoveryService<S> {
    source: S,
    config: DiscoveryConfig,
    hasher: IdentifierHasher,
}

impl<S: ContactSource> DiscoveryService<S> {
    /// Create a service over `source`.
    pub fn new(source: S, config: DiscoveryConfig) -> Self {
        let hasher = config.hasher();
        Self {
            source,
            config,
            hasher,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Hasher in use, for hashing identifiers outside the pipeline.
    pub fn hasher(&self) -> &IdentifierHasher {
        &self.hasher
    }

    /// Build a fresh local hash set from the user's contacts.
    ///
    /// Fails with [`Error::ConsentDenied`] before anything is read when the
    /// user does not grant access, and with [`Error::ContactReadTimeout`]
    /// when the read exceeds the configured bound. No partial set is ever
    /// returned.
    pub async fn hash_contacts(&self) -> Result<LocalHashSet> {
        let permission = self.source.request_permission().await?;
        if !permission.is_granted() {
            tracing::info!(?permission, "Contacts access not granted");
            return Err(Error::ConsentDenied);
        }

        let records = tokio::time::timeout(self.config.read_timeout, self.source.fetch_contacts())
            .await
            .map_err(|_| {
                tracing::warn!(
                    timeout_secs = self.config.read_timeout.as_secs(),
                    "Contact read timed out"
                );
                Error::ContactReadTimeout(self.config.read_timeout.as_secs())
            })??;

        let identifiers = collect_identifiers(&records);
        let identifier_count = identifiers.len();

        let set = build_hash_set_concurrent(&self.hasher, identifiers, self.config.workers).await;

        tracing::info!(
            contacts = records.len(),
            identifiers = identifier_count,
            unique_hashes = set.len(),
            digest = %self.hasher.algorithm(),
            salted = self.hasher.is_salted(),
            "Contacts hashed"
        );
        Ok(set)
    }
}
