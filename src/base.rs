use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::PostingIndex;
use crate::search::ScoredDocument;

pub type TermIndex = usize;
pub type ImpactValue = f64;
pub type DocId = u64;

/// Marks object that have a length
pub trait Len {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Term impact = document ID + partial score
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TermImpact {
    pub docid: DocId,
    pub value: ImpactValue,
}

impl std::fmt::Display for TermImpact {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.docid, self.value)
    }
}

/// A search function
pub type SearchFn =
    fn(index: &dyn PostingIndex, query: &[TermIndex], top_k: usize) -> Result<Vec<ScoredDocument>>;
