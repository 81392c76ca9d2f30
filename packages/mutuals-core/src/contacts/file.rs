//! Contact source backed by a JSON export of the address book.
//!
//! The file holds a JSON array of [`ContactRecord`] in the platform shape:
//!
//! ```json
//! [
//!   { "name": "Alice",
//!     "phoneNumbers": [{ "number": "(555) 123-4567", "label": "mobile" }],
//!     "emails": [{ "email": "Alice@Example.com" }] }
//! ]
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ContactRecord, ContactSource, PermissionStatus};
use crate::error::{Error, Result};

/// Reads contact records from a JSON file.
///
/// Permission is always granted: the user picked the file.
#[derive(Debug, Clone)]
pub struct FileContactSource {
    path: PathBuf,
}

impl FileContactSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContactSource for FileContactSource {
    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;

        let records: Vec<ContactRecord> = serde_json::from_str(&contents).map_err(|e| {
            Error::ContactSource(format!("cannot parse {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded contacts file"
        );
        Ok(records)
    }
}
