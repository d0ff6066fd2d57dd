//! Store Module
//!
//! Persistent storage of records in a single JSON file.
//!
//! ## Responsibilities
//! - Merge encoded records into the store file
//! - Key-level and sub-key-level edits and deletes
//! - Read paths: by key, by ordinal index, key and value listings
//!
//! ## File Format
//! ```text
//! {
//!     "<identifier>": {
//!         "<sub-key>": <token>,        ← JSON integer produced by the codec
//!         "<sub-key>": "<pass-through>" ← anything else is left untouched
//!     },
//!     ...
//! }
//! ```
//! Indentation is cosmetic. Identifier and sub-key order is preserved.
//!
//! ## Concurrency
//! Every operation reads the whole file, applies one mutation and rewrites
//! the whole file; nothing is cached between calls and nothing is locked.
//! Two processes writing the same file can lose each other's updates (last
//! writer wins). The store is meant for a single writer.
//!
//! ## Recovery
//! A missing file reads as an empty store. A file that is not a JSON object
//! of objects is treated as empty with a warning, and the next write
//! replaces it.

mod document;
mod lookup;
mod manager;

pub use document::{parse_document, read_document, write_document, Document};
pub use manager::{FileStore, Purge};
