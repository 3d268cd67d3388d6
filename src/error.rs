//! Error types

use crate::base::{DocId, TermIndex};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Insertion into a heap that already holds `capacity` entries
    #[error("heap capacity exceeded (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// Peek or removal on an empty heap
    #[error("heap is empty")]
    Empty,

    /// Read past the end of a posting list
    #[error("posting cursor is exhausted")]
    Exhausted,

    #[error("document {docid} is out of range (index holds {num_docs} documents)")]
    DocumentOutOfRange { docid: DocId, num_docs: usize },

    #[error("doc IDs should be strictly increasing for term {term_ix}: {previous} then {docid}")]
    NonIncreasingDocId {
        term_ix: TermIndex,
        previous: DocId,
        docid: DocId,
    },

    #[error("term and value lists should have the same length ({terms} vs {values})")]
    LengthMismatch { terms: usize, values: usize },

    #[error("term {term_ix} appears twice in document {docid}")]
    DuplicateTerm { term_ix: TermIndex, docid: DocId },

    #[error("document {docid} cannot be counted in memory")]
    DocIdOverflow { docid: DocId },

    #[error("impact value is not finite (term {term_ix}, document {docid})")]
    InvalidImpact { term_ix: TermIndex, docid: DocId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
