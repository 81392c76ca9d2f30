//! # FFI Bindings
//!
//! Foreign Function Interface for the mobile host app.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FFI ARCHITECTURE                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Swift/Kotlin host                                                     │
//! │   • asks for contacts permission                                       │
//! │   • reads the address book                                             │
//! │   • renders counts and matches                                         │
//! │         │                                                               │
//! │         ▼  mutuals_call(method, json_args)                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    dispatcher::dispatch                         │   │
//! │  │                                                                 │   │
//! │  │  contacts_hash │ contacts_match │ contacts_normalize │ version  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  normalize → hashing → matching                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every call returns an `FfiResult` carrying either JSON data or an error
//! code and message. Codes follow [`crate::Error::code`]; dispatcher-level
//! argument errors use 1 (bad JSON), 2 (missing field) and 404 (unknown
//! method).

mod c_api;
mod dispatcher;
mod types;

pub use c_api::*;
pub use dispatcher::{dispatch, DResult};
pub use types::*;
