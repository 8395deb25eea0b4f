//! Doxidx: tooling for generator-produced documentation search indexes
//!
//! Doxidx loads the static `searchData` fragments a Doxygen-style
//! documentation build drops under its `search/` directory, validates their
//! record structure, answers exact-match symbol lookups, and re-emits
//! fragments byte-for-byte.
//!
//! # Architecture
//!
//! - **Parser**: byte-cursor scanner for the fragment format
//! - **Index**: immutable per-fragment table plus a directory-wide catalog
//! - **Writer**: canonical serializer, lossless against the parser
//!
//! # Example Usage
//!
//! ```no_run
//! use doxidx::SymbolIndex;
//!
//! let index = SymbolIndex::load("search/functions_67.js").unwrap();
//! for occ in index.lookup("getdistance") {
//!     println!("{} -> {}", occ.owner, occ.url);
//! }
//! ```

pub mod cli;
pub mod error;
pub mod index;
pub mod models;
pub mod output;
pub mod parser;
pub mod writer;

// Re-export commonly used types
pub use error::IndexError;
pub use index::{Fragment, LookupMatch, SearchCatalog, SymbolIndex};
pub use models::{Entry, IndexStats, Occurrence, decode_entities, normalize_key};
