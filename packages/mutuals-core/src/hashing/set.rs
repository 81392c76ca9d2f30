//! Local hash set and the builders that produce it.
//!
//! Workers never share the set. Each one digests its slice of identifiers
//! into a plain vector, and the vectors are merged once every worker has
//! been joined. A failed digest costs only the identifier it was for.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use super::{HashValue, IdentifierHasher};
use crate::contacts::RawIdentifier;
use crate::error::Error;

/// Deduplicated set of digests of the user's own contact identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalHashSet {
    hashes: HashSet<HashValue>,
}

impl LocalHashSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a hash. Returns false if it was already present.
    pub fn insert(&mut self, hash: HashValue) -> bool {
        self.hashes.insert(hash)
    }

    /// Whether `hash` is in the set.
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Number of unique hashes.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &HashValue> {
        self.hashes.iter()
    }

    /// Hashes in ascending order.
    pub fn sorted(&self) -> Vec<&HashValue> {
        let mut hashes: Vec<&HashValue> = self.hashes.iter().collect();
        hashes.sort();
        hashes
    }

    /// One hash per line, sorted, for handing to the other party.
    pub fn to_text(&self) -> String {
        self.sorted()
            .into_iter()
            .map(HashValue::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Extend<HashValue> for LocalHashSet {
    fn extend<T: IntoIterator<Item = HashValue>>(&mut self, iter: T) {
        self.hashes.extend(iter);
    }
}

impl FromIterator<HashValue> for LocalHashSet {
    fn from_iter<T: IntoIterator<Item = HashValue>>(iter: T) -> Self {
        Self {
            hashes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LocalHashSet {
    type Item = &'a HashValue;
    type IntoIter = std::collections::hash_set::Iter<'a, HashValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.hashes.iter()
    }
}

/// Normalize and digest every identifier on the calling thread.
pub fn build_hash_set<'a, I>(hasher: &IdentifierHasher, identifiers: I) -> LocalHashSet
where
    I: IntoIterator<Item = &'a RawIdentifier>,
{
    identifiers
        .into_iter()
        .map(|raw| hasher.hash_identifier(raw))
        .collect()
}

/// Normalize and digest identifiers across `workers` blocking tasks.
///
/// The identifiers are split into contiguous chunks, one per worker. An
/// identifier whose digest fails (panics) is logged and left out; every other
/// identifier, including the rest of its chunk, still makes it into the set.
/// Dropping the returned future aborts any worker that has not finished.
pub async fn build_hash_set_concurrent(
    hasher: &IdentifierHasher,
    identifiers: Vec<RawIdentifier>,
    workers: usize,
) -> LocalHashSet {
    let hasher = hasher.clone();
    digest_concurrent(identifiers, workers, move |raw| hasher.hash_identifier(raw)).await
}

async fn digest_concurrent<F>(
    identifiers: Vec<RawIdentifier>,
    workers: usize,
    digest: F,
) -> LocalHashSet
where
    F: Fn(&RawIdentifier) -> HashValue + Clone + Send + 'static,
{
    if identifiers.is_empty() {
        return LocalHashSet::new();
    }

    let total = identifiers.len();
    let chunk_size = total.div_ceil(workers.max(1));

    let mut tasks = JoinSet::new();
    let mut remaining = identifiers.into_iter();
    loop {
        let chunk: Vec<RawIdentifier> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let digest = digest.clone();
        tasks.spawn_blocking(move || digest_chunk(&chunk, &digest));
    }

    let spawned = tasks.len();
    let mut set = LocalHashSet::new();
    let mut skipped = 0usize;
    let mut failed_workers = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((hashes, failed)) => {
                set.extend(hashes);
                skipped += failed;
            }
            Err(e) => {
                failed_workers += 1;
                let err = Error::DigestFailed(e.to_string());
                tracing::warn!(error = %err, "Digest worker failed, skipping its identifiers");
            }
        }
    }

    tracing::debug!(
        identifiers = total,
        workers = spawned,
        skipped_identifiers = skipped,
        failed_workers,
        unique = set.len(),
        "Built local hash set"
    );
    set
}

/// Digest one chunk, isolating each identifier. Returns the hashes and the
/// number of identifiers whose digest failed.
fn digest_chunk<F>(chunk: &[RawIdentifier], digest: &F) -> (Vec<HashValue>, usize)
where
    F: Fn(&RawIdentifier) -> HashValue,
{
    let mut hashes = Vec::with_capacity(chunk.len());
    let mut failed = 0usize;
    for raw in chunk {
        match panic::catch_unwind(AssertUnwindSafe(|| digest(raw))) {
            Ok(hash) => hashes.push(hash),
            Err(_) => {
                failed += 1;
                let err = Error::DigestFailed(format!("{} digest panicked", raw.kind()));
                tracing::warn!(error = %err, "Skipping identifier");
            }
        }
    }
    (hashes, failed)
}
