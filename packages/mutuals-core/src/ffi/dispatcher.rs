//! # FFI Dispatcher
//!
//! JSON-RPC style dispatcher that routes method names to core calls.
//! Called from `mutuals_call(method, args)` in c_api.rs.
//!
//! | Method | Args | Result |
//! |--------|------|--------|
//! | `version` | - | `{"version"}` |
//! | `contacts_hash` | `{"contacts": [ContactRecord], "digest"?, "salt"?}` | `{"count", "hashes"}` |
//! | `contacts_match` | `{"local_hashes": [..], "remote_text"}` | `{"count", "matches"}` |
//! | `contacts_normalize` | `{"kind", "value"}` | `{"normalized"}` |
//!
//! Returns `Ok(json_string)` on success, `Err((error_code, message))` on failure.
//! Every call is synchronous; the host has already read the contacts.

use serde::Deserialize;

use crate::contacts::{collect_identifiers, ContactRecord, IdentifierKind, RawIdentifier};
use crate::error::{Error, FfiError};
use crate::hashing::{build_hash_set, DigestAlgorithm, HashValue, IdentifierHasher, LocalHashSet};
use crate::matching::match_hashes;
use crate::normalize::normalize;

/// Dispatcher result: JSON on success, `(code, message)` on failure.
pub type DResult = Result<String, (i32, String)>;

// ============================================================================
// HELPERS
// ============================================================================

fn err(code: i32, msg: impl ToString) -> (i32, String) {
    (code, msg.to_string())
}

fn core_err(e: Error) -> (i32, String) {
    let ffi = FfiError::from(e);
    (ffi.code, ffi.message)
}

fn parse_args<T: for<'de> Deserialize<'de>>(args: &str) -> Result<T, (i32, String)> {
    let value: serde_json::Value =
        serde_json::from_str(args).map_err(|e| err(1, format!("Invalid JSON: {}", e)))?;
    serde_json::from_value(value).map_err(|e| err(2, format!("Invalid arguments: {}", e)))
}

fn ok_json(v: serde_json::Value) -> DResult {
    Ok(v.to_string())
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Route `method` to its handler.
pub fn dispatch(method: &str, args: &str) -> DResult {
    match method {
        "version" => ok_json(serde_json::json!({ "version": crate::version() })),
        "contacts_hash" => contacts_hash(args),
        "contacts_match" => contacts_match(args),
        "contacts_normalize" => contacts_normalize(args),
        _ => Err(err(404, format!("Unknown method: {}", method))),
    }
}

#[derive(Deserialize)]
struct HashArgs {
    contacts: Vec<ContactRecord>,
    #[serde(default)]
    digest: Option<String>,
    #[serde(default)]
    salt: Option<String>,
}

fn contacts_hash(args: &str) -> DResult {
    let args: HashArgs = parse_args(args)?;

    let algorithm = match args.digest.as_deref() {
        Some(name) => name.parse::<DigestAlgorithm>().map_err(core_err)?,
        None => DigestAlgorithm::default(),
    };
    let hasher = match args.salt.as_deref() {
        Some(salt) => IdentifierHasher::new(algorithm).with_salt(salt),
        None => IdentifierHasher::new(algorithm),
    };

    let identifiers = collect_identifiers(&args.contacts);
    let set = build_hash_set(&hasher, &identifiers);

    ok_json(serde_json::json!({
        "count": set.len(),
        "hashes": set.sorted(),
    }))
}

#[derive(Deserialize)]
struct MatchArgs {
    local_hashes: Vec<String>,
    #[serde(default)]
    remote_text: String,
}

fn contacts_match(args: &str) -> DResult {
    let args: MatchArgs = parse_args(args)?;

    let local = args
        .local_hashes
        .iter()
        .map(|h| HashValue::parse(h))
        .collect::<crate::Result<LocalHashSet>>()
        .map_err(core_err)?;

    let result = match_hashes(&local, &args.remote_text);
    ok_json(serde_json::json!({
        "count": result.count,
        "matches": result.matched_hashes,
    }))
}

#[derive(Deserialize)]
struct NormalizeArgs {
    kind: String,
    value: String,
}

fn contacts_normalize(args: &str) -> DResult {
    let args: NormalizeArgs = parse_args(args)?;
    let kind: IdentifierKind = args.kind.parse().map_err(core_err)?;
    let normalized = normalize(&RawIdentifier::new(kind, args.value));
    ok_json(serde_json::json!({ "normalized": normalized.as_str() }))
}
