//! # monokv
//!
//! A single-file key-multivalue record store with:
//! - One identifier per record, each holding an ordered sub-key → value mapping
//! - A reversible substitution codec that obscures stored values
//! - A set-like algebra over record fields (union, intersection, toggle
//!   difference, shifts, splits)
//! - A request/response handler for external dispatch layers
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Dispatch layer / CLI                         │
//! │              (named requests, string args)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Handler                                 │
//! │              (Request → Reply routing)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Record    │─────────▶│  FileStore  │
//!   │  (algebra)  │  store   │ (JSON file) │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │    Codec    │
//!                           │  (tokens)   │
//!                           └─────────────┘
//! ```
//!
//! ## Limitations
//! The store is single-writer: every operation rewrites the whole file and
//! nothing is locked, so concurrent writers can lose updates.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod record;
pub mod store;
pub mod handler;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DecodeError, MonoError, Result};
pub use config::Config;
pub use record::{Fields, Layout, Operand, Record, SetOutcome};
pub use store::{FileStore, Purge};
pub use handler::{Handler, Reply, Request};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of monokv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
