//! # Mutuals Core
//!
//! Privacy-preserving contact discovery: find which of a user's contacts
//! also use the app without either side revealing its address book.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         MUTUALS CORE MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌──────────────┐   │
//! │  │  Contacts   │  │  Normalize  │  │   Hashing   │  │   Matching   │   │
//! │  │             │  │             │  │             │  │              │   │
//! │  │ - Consent   │─►│ - Phones    │─►│ - SHA-2     │─►│ - Parse text │   │
//! │  │ - Records   │  │ - Emails    │  │ - Salt      │  │ - Intersect  │   │
//! │  │ - Sources   │  │             │  │ - Hash set  │  │              │   │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └──────────────┘   │
//! │         │                                 │                │           │
//! │         └─────────────────┬───────────────┴────────────────┘           │
//! │                           │                                             │
//! │  ┌────────────────────────┴────────────────────────────────────────┐   │
//! │  │                         Discovery                               │   │
//! │  │  - DiscoveryService: consent → read → hash pipeline            │   │
//! │  │  - DiscoverySession: local set + latest comparison             │   │
//! │  │  - DiscoveryConfig: digest, salt, read timeout, workers        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`contacts`] - Contact records, consent, contact sources
//! - [`normalize`] - Canonical forms for phone numbers and emails
//! - [`hashing`] - Digests and the local hash set
//! - [`matching`] - Intersection with the other party's hashes
//! - [`discovery`] - Pipeline, session, and configuration
//!
//! ## Privacy Model
//!
//! Only hex digests ever cross the library boundary. Raw and normalized
//! identifiers are wiped from memory on drop and never logged.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod contacts;
pub mod discovery;
pub mod error;
pub mod hashing;
pub mod matching;
pub mod normalize;

#[cfg(feature = "ffi")]
pub mod ffi;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use contacts::{ContactRecord, ContactSource, PermissionStatus, RawIdentifier};
pub use discovery::{DiscoveryConfig, DiscoveryService, DiscoverySession, SessionState};
pub use error::{Error, Result};
pub use hashing::{DigestAlgorithm, HashValue, IdentifierHasher, LocalHashSet};
pub use matching::{match_hashes, MatchResult};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of Mutuals Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns build information for debugging
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        #[cfg(target_os = "ios")]
        target: "ios",
        #[cfg(target_os = "android")]
        target: "android",
        #[cfg(target_os = "macos")]
        target: "macos",
        #[cfg(target_os = "linux")]
        target: "linux",
        #[cfg(target_os = "windows")]
        target: "windows",
        #[cfg(not(any(
            target_os = "ios",
            target_os = "android",
            target_os = "macos",
            target_os = "linux",
            target_os = "windows"
        )))]
        target: "unknown",
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    }
}

/// Build information for debugging
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Crate version
    pub version: &'static str,
    /// Target OS
    pub target: &'static str,
    /// Build profile (debug/release)
    pub profile: &'static str,
}

// ============================================================================
// TESTS
// ============================================================================
