//! In-memory posting lists and their persistence

use std::{collections::HashSet, fs::File, path::Path};

use log::info;
use ndarray::{ArrayBase, Data, Ix1};
use serde::{Deserialize, Serialize};

use crate::{
    base::{DocId, ImpactValue, Len, TermImpact, TermIndex},
    error::{Error, Result},
    index::PostingIndex,
};

pub const INDEX_CBOR: &str = "index.cbor";

/// Posting lists held in memory
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct MemoryIndex {
    postings: Vec<Vec<TermImpact>>,
    num_docs: usize,
}

/// Number of documents needed to hold `docid`
fn doc_count(docid: DocId) -> Result<usize> {
    usize::try_from(docid)
        .ok()
        .and_then(|d| d.checked_add(1))
        .ok_or(Error::DocIdOverflow { docid })
}

fn check_postings(term_ix: TermIndex, postings: &[TermImpact]) -> Result<()> {
    for (ix, impact) in postings.iter().enumerate() {
        if !impact.value.is_finite() {
            return Err(Error::InvalidImpact {
                term_ix,
                docid: impact.docid,
            });
        }
        if ix > 0 && postings[ix - 1].docid >= impact.docid {
            return Err(Error::NonIncreasingDocId {
                term_ix,
                previous: postings[ix - 1].docid,
                docid: impact.docid,
            });
        }
    }
    Ok(())
}

impl MemoryIndex {
    /// Builds an index from one posting list per term
    pub fn from_postings(postings: Vec<Vec<TermImpact>>) -> Result<Self> {
        for (term_ix, list) in postings.iter().enumerate() {
            check_postings(term_ix, list)?;
        }

        let mut num_docs: usize = 0;
        for impact in postings.iter().filter_map(|list| list.last()) {
            num_docs = num_docs.max(doc_count(impact.docid)?);
        }

        Ok(Self { postings, num_docs })
    }

    /// Overrides the number of documents (e.g. when trailing documents
    /// have no posting)
    pub fn with_num_docs(mut self, num_docs: usize) -> Self {
        self.num_docs = num_docs;
        self
    }

    /// Returns the postings of a term (empty for unknown terms)
    pub fn term_postings(&self, term_ix: TermIndex) -> &[TermImpact] {
        self.postings
            .get(term_ix)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Saves the index in `path/index.cbor`
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        let info_path = path.join(INDEX_CBOR);
        info!(
            "Saving index ({} terms, {} documents) into {}",
            self.postings.len(),
            self.num_docs,
            info_path.display()
        );

        let file = File::options()
            .write(true)
            .truncate(true)
            .create(true)
            .open(info_path)?;

        ciborium::ser::into_writer(self, file).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Loads an index saved with [`MemoryIndex::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let info_path = path.join(INDEX_CBOR);
        info!("Loading index from {}", info_path.display());
        let file = File::options().read(true).open(info_path)?;

        let index: MemoryIndex =
            ciborium::de::from_reader(file).map_err(|e| Error::Serialization(e.to_string()))?;

        // The file might not have been written by us
        for (term_ix, list) in index.postings.iter().enumerate() {
            check_postings(term_ix, list)?;
        }
        Ok(index)
    }
}

impl Len for MemoryIndex {
    fn len(&self) -> usize {
        self.postings.len()
    }
}

impl PostingIndex for MemoryIndex {
    fn postings<'a>(&'a self, term_ix: TermIndex) -> Box<dyn Iterator<Item = TermImpact> + 'a> {
        Box::new(self.term_postings(term_ix).iter().copied())
    }

    fn num_docs(&self) -> usize {
        self.num_docs
    }
}

/// Builds a [`MemoryIndex`] one document at a time.
///
/// Documents must be added by strictly increasing document ID.
#[derive(Default)]
pub struct Indexer {
    postings: Vec<Vec<TermImpact>>,
    last_docid: Option<DocId>,
}

impl Indexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document given its terms and their partial scores
    pub fn add<S, T>(
        &mut self,
        docid: DocId,
        terms: &ArrayBase<S, Ix1>,
        values: &ArrayBase<T, Ix1>,
    ) -> Result<()>
    where
        S: Data<Elem = TermIndex>,
        T: Data<Elem = ImpactValue>,
    {
        if terms.len() != values.len() {
            return Err(Error::LengthMismatch {
                terms: terms.len(),
                values: values.len(),
            });
        }

        // Checks everything before modifying the postings
        if let Some(previous) = self.last_docid {
            if previous >= docid {
                return Err(Error::NonIncreasingDocId {
                    term_ix: terms.get(0).copied().unwrap_or(0),
                    previous,
                    docid,
                });
            }
        }
        let mut seen = HashSet::new();
        for (&term_ix, &value) in terms.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(Error::InvalidImpact { term_ix, docid });
            }
            if !seen.insert(term_ix) {
                return Err(Error::DuplicateTerm { term_ix, docid });
            }
        }

        for (&term_ix, &value) in terms.iter().zip(values.iter()) {
            // Adds new vectors for missing words
            if term_ix >= self.postings.len() {
                self.postings.resize_with(term_ix + 1, Vec::new);
            }
            self.postings[term_ix].push(TermImpact { docid, value });
        }

        self.last_docid = Some(docid);
        Ok(())
    }

    /// Number of terms seen so far
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn into_index(self) -> Result<MemoryIndex> {
        let num_docs = match self.last_docid {
            Some(docid) => doc_count(docid)?,
            None => 0,
        };
        Ok(MemoryIndex {
            postings: self.postings,
            num_docs,
        })
    }
}
