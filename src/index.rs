//! Posting list access: the index seam and the posting cursors

use crate::base::{Len, TermImpact, TermIndex};
use crate::error::{Error, Result};

/// An index giving access to one posting list per term.
///
/// Posting lists are sorted by strictly increasing document ID.
pub trait PostingIndex: Len {
    /// Returns a forward iterator over the postings of a term
    ///
    /// ## Arguments
    ///
    /// * `term_ix` The index of the term (should be lower than `len()`)
    fn postings<'a>(&'a self, term_ix: TermIndex) -> Box<dyn Iterator<Item = TermImpact> + 'a>;

    /// Number of documents, i.e. one more than the largest document ID
    fn num_docs(&self) -> usize;

    /// Returns a cursor positioned on the first posting of a term
    fn cursor<'a>(&'a self, term_ix: TermIndex) -> PostingCursor<'a> {
        PostingCursor::new(self.postings(term_ix))
    }
}

/// A forward-only position in a posting list.
///
/// The cursor does not own the postings; restarting means building a new
/// cursor from the index.
pub struct PostingCursor<'a> {
    iterator: Box<dyn Iterator<Item = TermImpact> + 'a>,
    current: Option<TermImpact>,
}

impl<'a> PostingCursor<'a> {
    pub fn new(mut iterator: Box<dyn Iterator<Item = TermImpact> + 'a>) -> Self {
        let current = iterator.next();
        Self { iterator, current }
    }

    /// Returns the current posting, or [`Error::Exhausted`] past the end of
    /// the list
    pub fn current(&self) -> Result<TermImpact> {
        self.current.ok_or(Error::Exhausted)
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next posting; does nothing once exhausted
    pub fn advance(&mut self) {
        if let Some(previous) = self.current {
            self.current = self.iterator.next();
            debug_assert!(
                self.current.map_or(true, |c| c.docid > previous.docid),
                "posting list is not sorted by increasing doc ID"
            );
        }
    }
}
