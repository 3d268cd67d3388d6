//! Top-k ranking of documents against a multi-term query.
//!
//! Posting lists are either merged document-at-a-time
//! ([`search::merge::search_merge`]) or accumulated in a dense score
//! array ([`search::scan::search_full_scan`]); in both cases a bounded
//! min-heap ([`heap::BoundedMinHeap`]) keeps the best documents.

pub mod base;
pub mod builder;
pub mod error;
pub mod heap;
pub mod index;
pub mod search;

pub use error::{Error, Result};
