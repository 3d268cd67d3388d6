//! Document-at-a-time search by k-way merge of the posting lists

use log::{debug, trace};

use crate::{
    base::{DocId, ImpactValue, TermIndex},
    error::Result,
    heap::BoundedMinHeap,
    index::{PostingCursor, PostingIndex},
    search::{ScoredDocument, TopScoredDocuments},
};

/// Holds one cursor per active query term, ordered by the document ID the
/// cursor is positioned on.
///
/// Documents come out in strictly increasing ID order, each with the sum
/// of its partial scores over all the query terms.
pub struct MergeFrontier<'a> {
    heap: BoundedMinHeap<PostingCursor<'a>, DocId>,
}

impl<'a> MergeFrontier<'a> {
    pub fn new(index: &'a dyn PostingIndex, query: &[TermIndex]) -> Result<Self> {
        // One slot per query term
        let mut heap = BoundedMinHeap::new(query.len());

        for &ix in query.iter() {
            // Discard a term if the index does not match
            if ix >= index.len() {
                debug!("Discarding term with index {}", ix);
                continue;
            }

            let cursor = index.cursor(ix);
            if !cursor.is_exhausted() {
                heap.insert(cursor.current()?.docid, cursor)?;
            }
        }

        debug!(
            "Merging {} posting lists ({} query terms)",
            heap.len(),
            query.len()
        );
        Ok(Self { heap })
    }

    /// Number of posting lists that are not exhausted yet
    pub fn active(&self) -> usize {
        self.heap.len()
    }

    /// Returns the next document and its total score, or `None` once all
    /// the posting lists have been consumed
    pub fn next_document(&mut self) -> Result<Option<ScoredDocument>> {
        if self.heap.is_empty() {
            return Ok(None);
        }

        let docid = self.heap.peek_min_key()?;
        let mut score: ImpactValue = 0.;

        // Consume every cursor positioned on this document
        while !self.heap.is_empty() && self.heap.peek_min_key()? == docid {
            let mut cursor = self.heap.remove_min()?;
            score += cursor.current()?.value;

            cursor.advance();
            if !cursor.is_exhausted() {
                self.heap.insert(cursor.current()?.docid, cursor)?;
            }
        }

        trace!("Document {} has score {}", docid, score);
        Ok(Some(ScoredDocument { docid, score }))
    }
}

/// Search by merging the posting lists of the query terms
pub fn search_merge(
    index: &dyn PostingIndex,
    query: &[TermIndex],
    top_k: usize,
) -> Result<Vec<ScoredDocument>> {
    let mut frontier = MergeFrontier::new(index, query)?;
    let mut results = TopScoredDocuments::new(top_k);

    while let Some(document) = frontier.next_document()? {
        results.add(document.docid, document.score)?;
    }

    Ok(results.into_sorted_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{base::TermImpact, builder::MemoryIndex};

    fn make_index(lists: &[&[(DocId, ImpactValue)]]) -> MemoryIndex {
        MemoryIndex::from_postings(
            lists
                .iter()
                .map(|list| {
                    list.iter()
                        .map(|&(docid, value)| TermImpact { docid, value })
                        .collect()
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_merge_sums_scores() {
        let index = make_index(&[&[(1, 3.0), (2, 1.0), (5, 4.0)], &[(2, 2.0), (5, 1.0)]]);
        let mut frontier = MergeFrontier::new(&index, &[0, 1]).unwrap();
        assert_eq!(frontier.active(), 2);

        let mut documents = Vec::new();
        while let Some(document) = frontier.next_document().unwrap() {
            documents.push(document);
        }
        assert_eq!(frontier.active(), 0);
        assert_eq!(
            documents,
            vec![
                ScoredDocument { docid: 1, score: 3.0 },
                ScoredDocument { docid: 2, score: 3.0 },
                ScoredDocument { docid: 5, score: 5.0 },
            ]
        );
    }

    #[test]
    fn test_search_merge_top_2() {
        let index = make_index(&[&[(1, 3.0), (2, 1.0), (5, 4.0)], &[(2, 2.0), (5, 1.0)]]);
        let results = search_merge(&index, &[0, 1], 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], ScoredDocument { docid: 5, score: 5.0 });
        // Documents 1 and 2 are tied
        assert_eq!(results[1].score, 3.0);
        assert!(results[1].docid == 1 || results[1].docid == 2);
    }

    #[test]
    fn test_empty_and_unknown_terms() {
        let index = make_index(&[&[], &[(4, 1.5)]]);

        // Term 0 is empty and term 7 does not exist
        let results = search_merge(&index, &[0, 7, 1], 5).unwrap();
        assert_eq!(results, vec![ScoredDocument { docid: 4, score: 1.5 }]);

        assert!(search_merge(&index, &[], 5).unwrap().is_empty());
        assert!(search_merge(&index, &[0], 5).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_term() {
        let index = make_index(&[&[(0, 1.0), (3, 2.0)]]);
        let results = search_merge(&index, &[0, 0], 5).unwrap();
        assert_eq!(
            results,
            vec![
                ScoredDocument { docid: 3, score: 4.0 },
                ScoredDocument { docid: 0, score: 2.0 },
            ]
        );
    }

    #[test]
    fn test_many_lists_sharing_documents() {
        // Each of the 5 lists contains every multiple of its step
        let lists: Vec<Vec<(DocId, ImpactValue)>> = (1..=5)
            .map(|step| (0..60).step_by(step).map(|d| (d as DocId, 1.)).collect())
            .collect();
        let slices: Vec<&[(DocId, ImpactValue)]> = lists.iter().map(|l| l.as_slice()).collect();
        let index = make_index(&slices);

        let mut frontier = MergeFrontier::new(&index, &[0, 1, 2, 3, 4]).unwrap();
        let mut previous: Option<DocId> = None;
        while let Some(document) = frontier.next_document().unwrap() {
            assert!(previous.map_or(true, |p| p < document.docid));
            let expected = (1..=5).filter(|s| document.docid % s == 0).count();
            assert_eq!(document.score, expected as ImpactValue);
            previous = Some(document.docid);
        }
        assert_eq!(previous, Some(59));
    }
}
