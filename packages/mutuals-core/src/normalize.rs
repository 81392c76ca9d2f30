//! # Identifier Normalization
//!
//! Canonicalizes raw phone numbers and email addresses so that formatting
//! differences do not produce different hashes.
//!
//! | Kind | Rule | Example |
//! |------|------|---------|
//! | Phone | keep ASCII digits `0-9`, drop everything else | `(555) 123-4567` → `5551234567` |
//! | Email | trim surrounding whitespace, lowercase | `  Alice@Example.com ` → `alice@example.com` |
//!
//! Both rules are total: any input, including the empty string, normalizes
//! to some string. There is no country-code handling, so `+1 555 123 4567`
//! and `555 123 4567` normalize differently.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::contacts::{IdentifierKind, RawIdentifier};

/// Canonical text form of a contact identifier, ready to be digested.
///
/// The text is wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct NormalizedIdentifier(String);

impl NormalizedIdentifier {
    /// Normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes fed to the digest.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Whether normalization left nothing behind.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for NormalizedIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NormalizedIdentifier(<{} bytes>)", self.0.len())
    }
}

/// Normalize a raw identifier according to its kind.
pub fn normalize(raw: &RawIdentifier) -> NormalizedIdentifier {
    match raw.kind() {
        IdentifierKind::Phone => normalize_phone(raw.value()),
        IdentifierKind::Email => normalize_email(raw.value()),
    }
}

/// Strip every character that is not an ASCII digit.
#[inline]
#[must_use]
pub fn normalize_phone(phone: &str) -> NormalizedIdentifier {
    NormalizedIdentifier(phone.chars().filter(char::is_ascii_digit).collect())
}

/// Trim surrounding whitespace and lowercase.
#[inline]
#[must_use]
pub fn normalize_email(email: &str) -> NormalizedIdentifier {
    NormalizedIdentifier(email.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_strips_formatting() {
        assert_eq!(normalize_phone("(555) 123-4567").as_str(), "5551234567");
        assert_eq!(normalize_phone("555.123.4567 ext").as_str(), "5551234567");
    }

    #[test]
    fn phone_keeps_leading_zeros_and_drops_plus() {
        assert_eq!(normalize_phone("+44 020 7946 0000").as_str(), "4402079460000");
        assert_eq!(normalize_phone("007").as_str(), "007");
    }

    #[test]
    fn phone_without_country_code_differs() {
        assert_ne!(normalize_phone("5551234567"), normalize_phone("+15551234567"));
    }

    #[test]
    fn phone_ignores_non_ascii_digits() {
        // Arabic-Indic digits are not in 0-9
        assert_eq!(normalize_phone("٥٥٥1").as_str(), "1");
    }

    #[test]
    fn phone_empty_and_letters_only() {
        assert!(normalize_phone("").is_empty());
        assert!(normalize_phone("call me").is_empty());
    }

    #[test]
    fn email_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Alice@Example.com  ").as_str(),
            "alice@example.com"
        );
        assert_eq!(normalize_email("\tBOB@EXAMPLE.ORG\n").as_str(), "bob@example.org");
    }

    #[test]
    fn email_is_not_validated() {
        assert_eq!(normalize_email(" Not An Email ").as_str(), "not an email");
        assert!(normalize_email("   ").is_empty());
    }

    #[test]
    fn normalize_dispatches_on_kind() {
        assert_eq!(normalize(&RawIdentifier::phone("555-1234")).as_str(), "5551234");
        assert_eq!(normalize(&RawIdentifier::email(" A@B.C ")).as_str(), "a@b.c");
        // Same text, different kind, different result
        assert_eq!(normalize(&RawIdentifier::email("555-1234")).as_str(), "555-1234");
    }

    #[test]
    fn debug_hides_contents() {
        let id = normalize_email("alice@example.com");
        assert!(!format!("{:?}", id).contains("alice"));
    }
}
