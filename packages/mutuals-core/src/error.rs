//! # Error Handling
//!
//! Error types for Mutuals Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Contact Source Errors                                             │
//! │  │   ├── ConsentDenied         - User refused contacts access          │
//! │  │   ├── ContactReadTimeout    - Contact read exceeded its deadline    │
//! │  │   ├── ContactReadCancelled  - Contact read was cancelled            │
//! │  │   └── ContactSource         - Source failed to produce records      │
//! │  │                                                                      │
//! │  ├── Digest Errors                                                     │
//! │  │   ├── UnsupportedDigest     - Unknown digest algorithm name         │
//! │  │   └── DigestFailed          - One digest failed (logged, skipped)   │
//! │  │                                                                      │
//! │  └── Input Errors                                                      │
//! │      └── InvalidArgument       - Malformed call arguments              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is *not* here: empty or malformed remote hash text and contact
//! entries with a missing value never produce an error. The former yields
//! zero matches, the latter is skipped.

use thiserror::Error;

/// Result type alias for Mutuals Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Mutuals Core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Contact Source Errors (100-199)
    // ========================================================================

    /// The user did not grant access to their contacts
    #[error("Permission denied. Please enable contacts access in settings.")]
    ConsentDenied,

    /// Reading contacts took longer than the configured deadline
    #[error("Failed to read contacts: timed out after {0} seconds")]
    ContactReadTimeout(u64),

    /// Reading contacts was cancelled before it completed
    #[error("Failed to read contacts: the read was cancelled")]
    ContactReadCancelled,

    /// The contact source failed to produce records
    #[error("Failed to read contacts: {0}")]
    ContactSource(String),

    // ========================================================================
    // Digest Errors (200-299)
    // ========================================================================

    /// Unknown digest algorithm name
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedDigest(String),

    /// Digesting one identifier, or a whole worker, failed
    #[error("Digest failed: {0}")]
    DigestFailed(String),

    // ========================================================================
    // Input Errors (300-399)
    // ========================================================================

    /// Malformed call arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Get the error code for FFI
    ///
    /// Error codes are organized by category:
    /// - 100-199: Consent and contact source
    /// - 200-299: Digest
    /// - 300-399: Input
    pub fn code(&self) -> i32 {
        match self {
            // Contact source (100-199)
            Error::ConsentDenied => 100,
            Error::ContactReadTimeout(_) => 101,
            Error::ContactReadCancelled => 102,
            Error::ContactSource(_) => 103,

            // Digest (200-299)
            Error::UnsupportedDigest(_) => 200,
            Error::DigestFailed(_) => 201,

            // Input (300-399)
            Error::InvalidArgument(_) => 300,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Recoverable errors can potentially be resolved by retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ContactReadTimeout(_) | Error::ContactReadCancelled
        )
    }

    /// Check if this error requires user action
    pub fn requires_user_action(&self) -> bool {
        matches!(self, Error::ConsentDenied)
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ContactSource(err.to_string())
    }
}

// ============================================================================
// FFI ERROR REPRESENTATION
// ============================================================================

/// FFI-friendly error representation
#[derive(Debug, Clone)]
pub struct FfiError {
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Whether the error is recoverable
    pub recoverable: bool,
}

impl From<Error> for FfiError {
    fn from(err: Error) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::ConsentDenied.code(), 100);
        assert_eq!(Error::ContactReadTimeout(30).code(), 101);
        assert_eq!(Error::UnsupportedDigest("md5".into()).code(), 200);
        assert_eq!(Error::InvalidArgument("test".into()).code(), 300);
        assert_eq!(Error::DigestFailed("panic".into()).code(), 201);
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::ContactReadTimeout(30).is_recoverable());
        assert!(Error::ContactReadCancelled.is_recoverable());
        assert!(!Error::ConsentDenied.is_recoverable());
        assert!(!Error::DigestFailed("panic".into()).is_recoverable());
    }

    #[test]
    fn test_user_action_errors() {
        assert!(Error::ConsentDenied.requires_user_action());
        assert!(!Error::ContactReadTimeout(30).requires_user_action());
    }

    #[test]
    fn test_timeout_message_names_duration() {
        let msg = Error::ContactReadTimeout(15).to_string();
        assert!(msg.contains("15 seconds"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::ContactSource(_)));
        assert_eq!(err.code(), 103);
    }

    #[test]
    fn test_ffi_error_conversion() {
        let ffi: FfiError = Error::ConsentDenied.into();
        assert_eq!(ffi.code, 100);
        assert!(!ffi.recoverable);
        assert!(ffi.message.contains("Permission denied"));
    }
}
