//! # Contacts Module
//!
//! The interface to the platform contact store, plus the identifier types that
//! flow out of it into the hashing pipeline.
//!
//! ## Contact Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          CONTACT FLOW                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ContactSource                                                         │
//! │  ┌─────────────────────┐                                               │
//! │  │ request_permission()│──► Denied ──► stop, nothing is read           │
//! │  └──────────┬──────────┘                                               │
//! │             │ Granted                                                  │
//! │             ▼                                                          │
//! │  ┌─────────────────────┐                                               │
//! │  │ fetch_contacts()    │──► Vec<ContactRecord>                         │
//! │  └──────────┬──────────┘                                               │
//! │             ▼                                                          │
//! │  ┌─────────────────────┐                                               │
//! │  │ identifiers()       │──► RawIdentifier { Phone | Email, value }     │
//! │  │                     │    (entries without a value are skipped)      │
//! │  └─────────────────────┘                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names and labels are carried in [`ContactRecord`] so that records from the
//! platform deserialize as-is, but they never leave this module.

mod file;
mod memory;

pub use file::FileContactSource;
pub use memory::MemoryContactSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Kind of a contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// A phone number in any formatting
    Phone,
    /// An email address
    Email,
}

impl IdentifierKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Phone => "phone",
            IdentifierKind::Email => "email",
        }
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IdentifierKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" => Ok(IdentifierKind::Phone),
            "email" => Ok(IdentifierKind::Email),
            other => Err(Error::InvalidArgument(format!(
                "unknown identifier kind '{}'",
                other
            ))),
        }
    }
}

/// A raw, unnormalized identifier as produced by the contact source.
///
/// The value is wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RawIdentifier {
    #[zeroize(skip)]
    kind: IdentifierKind,
    value: String,
}

impl RawIdentifier {
    /// Create a raw identifier of the given kind.
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Create a raw phone identifier.
    pub fn phone(value: impl Into<String>) -> Self {
        Self::new(IdentifierKind::Phone, value)
    }

    /// Create a raw email identifier.
    pub fn email(value: impl Into<String>) -> Self {
        Self::new(IdentifierKind::Email, value)
    }

    /// Identifier kind.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Raw value, exactly as the contact source produced it.
    pub fn value(&self) -> &str {
        &self.value
    }
}

// Keep contact data out of debug output and logs.
impl std::fmt::Debug for RawIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawIdentifier")
            .field("kind", &self.kind)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// A phone number entry on a contact record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhoneEntry {
    /// The number as entered in the address book.
    #[serde(default)]
    pub number: Option<String>,
    /// Optional label ("mobile", "work", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An email entry on a contact record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailEntry {
    /// The address as entered in the address book.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional label ("home", "work", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A contact record as produced by the platform contact store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Platform record ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Zero or more phone numbers.
    #[serde(default)]
    pub phone_numbers: Vec<PhoneEntry>,
    /// Zero or more email addresses.
    #[serde(default)]
    pub emails: Vec<EmailEntry>,
}

impl ContactRecord {
    /// Create a record from plain phone and email strings.
    pub fn new<P, E>(phones: P, emails: E) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            id: None,
            name: None,
            phone_numbers: phones
                .into_iter()
                .map(|p| PhoneEntry {
                    number: Some(p.into()),
                    label: None,
                })
                .collect(),
            emails: emails
                .into_iter()
                .map(|e| EmailEntry {
                    email: Some(e.into()),
                    label: None,
                })
                .collect(),
        }
    }

    /// Raw identifiers on this record, phones first.
    ///
    /// Entries with a missing value are skipped.
    pub fn identifiers(&self) -> impl Iterator<Item = RawIdentifier> + '_ {
        let phones = self
            .phone_numbers
            .iter()
            .filter_map(|p| p.number.as_deref().map(RawIdentifier::phone));
        let emails = self
            .emails
            .iter()
            .filter_map(|e| e.email.as_deref().map(RawIdentifier::email));
        phones.chain(emails)
    }

    /// Number of entries on this record that carry no value.
    pub fn malformed_entries(&self) -> usize {
        self.phone_numbers.iter().filter(|p| p.number.is_none()).count()
            + self.emails.iter().filter(|e| e.email.is_none()).count()
    }
}

/// Flatten contact records into raw identifiers.
///
/// Malformed entries are dropped and counted in a debug log line.
pub fn collect_identifiers(records: &[ContactRecord]) -> Vec<RawIdentifier> {
    let identifiers: Vec<RawIdentifier> =
        records.iter().flat_map(ContactRecord::identifiers).collect();

    let skipped: usize = records.iter().map(ContactRecord::malformed_entries).sum();
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped contact entries without a value");
    }

    identifiers
}

/// Answer to a contacts permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Access granted
    Granted,
    /// Access refused
    Denied,
    /// The user dismissed the prompt without answering
    Undetermined,
}

impl PermissionStatus {
    /// Only an explicit grant allows reading contacts.
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

/// Platform capability that yields the user's contacts, subject to consent.
#[async_trait]
pub trait ContactSource: Send + Sync {
    /// Ask the user for access to their contacts.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Read every contact record.
    ///
    /// Only called after [`ContactSource::request_permission`] returned
    /// [`PermissionStatus::Granted`].
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>>;
}
