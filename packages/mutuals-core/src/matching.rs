//! # Set Matching
//!
//! Intersects the local hash set with the other party's hashes.
//!
//! The other party's hashes arrive as free text, one per line or separated by
//! any whitespace. Tokens are compared to local hashes by exact,
//! case-sensitive string equality, so a token that is not a hash simply never
//! matches. Parsing and matching cannot fail.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::hashing::{HashValue, LocalHashSet};

/// Hash tokens supplied by the other party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteHashSet {
    tokens: HashSet<String>,
}

impl RemoteHashSet {
    /// Split `text` on whitespace runs and keep the non-empty tokens.
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text
                .split_whitespace()
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Whether `token` was supplied.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no tokens were supplied.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Intersection of the local and remote hash sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Hashes present on both sides, in ascending order.
    pub matched_hashes: BTreeSet<HashValue>,
    /// Number of matched hashes.
    pub count: usize,
}

impl MatchResult {
    fn from_matches(matched_hashes: BTreeSet<HashValue>) -> Self {
        let count = matched_hashes.len();
        Self {
            matched_hashes,
            count,
        }
    }

    /// Whether `hash` matched.
    pub fn contains(&self, hash: &str) -> bool {
        self.matched_hashes.contains(hash)
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Intersect `local` with an already parsed remote set.
pub fn intersect(local: &LocalHashSet, remote: &RemoteHashSet) -> MatchResult {
    MatchResult::from_matches(
        local
            .iter()
            .filter(|hash| remote.contains(hash.as_str()))
            .cloned()
            .collect(),
    )
}

/// Parse `remote_text` and intersect it with `local`.
pub fn match_hashes(local: &LocalHashSet, remote_text: &str) -> MatchResult {
    let remote = RemoteHashSet::parse(remote_text);
    let result = intersect(local, &remote);
    tracing::debug!(
        local = local.len(),
        remote = remote.len(),
        matched = result.count,
        "Compared hash sets"
    );
    result
}
