//! In-memory contact source.

use async_trait::async_trait;

use super::{ContactRecord, ContactSource, PermissionStatus};
use crate::error::Result;

/// Contact source over records the host already holds.
///
/// Used by tests, demos, and FFI hosts that read the address book on their
/// side and hand the records over.
#[derive(Debug, Clone)]
pub struct MemoryContactSource {
    records: Vec<ContactRecord>,
    permission: PermissionStatus,
}

impl MemoryContactSource {
    /// Create a source that grants access and yields `records`.
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self {
            records,
            permission: PermissionStatus::Granted,
        }
    }

    /// Create a source whose permission request is refused.
    pub fn denied() -> Self {
        Self {
            records: Vec::new(),
            permission: PermissionStatus::Denied,
        }
    }

    /// Override the permission answer.
    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }
}

#[async_trait]
impl ContactSource for MemoryContactSource {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>> {
        Ok(self.records.clone())
    }
}
