//! A single hash-then-compare session, owned by the integrating app.

use serde::Serialize;

use super::DiscoveryService;
use crate::contacts::ContactSource;
use crate::error::Error;
use crate::hashing::LocalHashSet;
use crate::matching::{match_hashes, MatchResult};

/// Where a session stands, in the terms a UI renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Contacts have not been hashed yet.
    Idle,
    /// The user refused contacts access.
    Denied,
    /// Reading or hashing contacts failed.
    Failed {
        /// Human-readable reason.
        reason: String,
    },
    /// The local hash set is ready.
    Ready {
        /// Number of unique local hashes.
        count: usize,
    },
}

/// Holds the local hash set and the latest comparison for one session.
///
/// The match is recomputed whenever either side changes: on every
/// [`compare`](Self::compare), and on every [`start`](Self::start) against
/// the last remote text seen.
pub struct DiscoverySession<S> {
    service: DiscoveryService<S>,
    state: SessionState,
    local: Option<LocalHashSet>,
    remote_text: Option<String>,
    last_match: Option<MatchResult>,
}

impl<S: ContactSource> DiscoverySession<S> {
    /// Create an idle session.
    pub fn new(service: DiscoveryService<S>) -> Self {
        Self {
            service,
            state: SessionState::Idle,
            local: None,
            remote_text: None,
            last_match: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Local hash set, once ready.
    pub fn local_hashes(&self) -> Option<&LocalHashSet> {
        self.local.as_ref()
    }

    /// Latest comparison result.
    pub fn last_match(&self) -> Option<&MatchResult> {
        self.last_match.as_ref()
    }

    /// Underlying pipeline.
    pub fn service(&self) -> &DiscoveryService<S> {
        &self.service
    }

    /// Hash the user's contacts, replacing any previous local set.
    ///
    /// A denied or failed run leaves no local set and no match behind.
    pub async fn start(&mut self) -> &SessionState {
        match self.service.hash_contacts().await {
            Ok(set) => {
                self.state = SessionState::Ready { count: set.len() };
                self.last_match = self
                    .remote_text
                    .as_deref()
                    .map(|text| match_hashes(&set, text));
                self.local = Some(set);
            }
            Err(e) => {
                self.state = match e {
                    Error::ConsentDenied => SessionState::Denied,
                    other => SessionState::Failed {
                        reason: other.to_string(),
                    },
                };
                self.local = None;
                self.last_match = None;
            }
        }
        &self.state
    }

    /// Compare the local set with the other party's hash text.
    ///
    /// Returns `None` while there is no local set; the text is kept and used
    /// once [`start`](Self::start) succeeds.
    pub fn compare(&mut self, remote_text: &str) -> Option<&MatchResult> {
        self.remote_text = Some(remote_text.to_string());
        self.last_match = self
            .local
            .as_ref()
            .map(|local| match_hashes(local, remote_text));
        self.last_match.as_ref()
    }
}
