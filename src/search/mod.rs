pub mod merge;
pub mod scan;

use std::io::Write;

use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::{
    base::{DocId, ImpactValue, SearchFn, TermIndex},
    error::Result,
    heap::BoundedMinHeap,
    index::PostingIndex,
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoredDocument {
    pub docid: DocId,
    pub score: ImpactValue,
}

impl std::fmt::Display for ScoredDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.docid, self.score)
    }
}

/// Keeps the `top_k` highest scored documents among those offered
pub struct TopScoredDocuments {
    heap: BoundedMinHeap<DocId>,
    top_k: usize,
}

impl TopScoredDocuments {
    pub fn new(top_k: usize) -> Self {
        Self {
            heap: BoundedMinHeap::new(top_k),
            top_k,
        }
    }

    /// Add a new candidate, and returns the new lower bound on scores
    pub fn add(&mut self, candidate: DocId, score: ImpactValue) -> Result<ImpactValue> {
        if self.heap.len() < self.top_k {
            self.heap.insert(score, candidate)?;
        } else if self.top_k > 0 && self.heap.peek_min_key()? < score {
            self.heap.remove_min()?;
            self.heap.insert(score, candidate)?;
        }

        Ok(self.threshold())
    }

    /// Score a candidate has to beat to enter the top-k
    ///
    /// This is -infinity while the heap is not full, and +infinity when
    /// `top_k` is zero.
    pub fn threshold(&self) -> ImpactValue {
        if self.top_k == 0 {
            ImpactValue::INFINITY
        } else if self.heap.is_full() {
            self.heap
                .peek_min_key()
                .unwrap_or(ImpactValue::NEG_INFINITY)
        } else {
            ImpactValue::NEG_INFINITY
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drains the retained documents, highest score first
    pub fn into_sorted_vec(mut self) -> Vec<ScoredDocument> {
        let mut results = vec![ScoredDocument::default(); self.heap.len()];

        // Minimums come out first and fill the vector from the back
        let mut position = results.len();
        while let Ok((score, docid)) = self.heap.remove_min_entry() {
            position -= 1;
            results[position] = ScoredDocument { docid, score };
        }

        results
    }
}

#[derive(Derivative, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[derivative(Default)]
pub enum SearchStrategy {
    /// k-way merge of the posting lists
    #[derivative(Default)]
    Merge,
    /// Dense accumulation of the scores of all documents
    FullScan,
}

impl SearchStrategy {
    pub fn search_fn(&self) -> SearchFn {
        match self {
            SearchStrategy::Merge => merge::search_merge,
            SearchStrategy::FullScan => scan::search_full_scan,
        }
    }
}

#[derive(Derivative, Serialize, Deserialize, Clone, Debug)]
#[derivative(Default)]
pub struct SearchOptions {
    /// Number of documents to retrieve
    #[derivative(Default(value = "10"))]
    pub top_k: usize,

    pub strategy: SearchStrategy,
}

/// Ranks documents against a query with the configured strategy
pub fn search(
    index: &dyn PostingIndex,
    query: &[TermIndex],
    options: &SearchOptions,
) -> Result<Vec<ScoredDocument>> {
    (options.strategy.search_fn())(index, query, options.top_k)
}

/// Writes one line per result, skipping documents without a positive score
pub fn write_results<W: Write>(out: &mut W, results: &[ScoredDocument]) -> std::io::Result<()> {
    for result in results.iter().filter(|r| r.score > 0.) {
        writeln!(out, "{:6} {:.6}", result.docid, result.score)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retained_scores(top: TopScoredDocuments) -> Vec<ImpactValue> {
        top.into_sorted_vec().iter().map(|d| d.score).collect()
    }

    #[test]
    fn test_keeps_largest() {
        for order in [[5., 2., 8., 1.], [1., 8., 2., 5.], [8., 5., 2., 1.]] {
            let mut top = TopScoredDocuments::new(3);
            for (docid, &score) in order.iter().enumerate() {
                top.add(docid as DocId, score).unwrap();
            }
            assert_eq!(top.len(), 3);
            assert_eq!(retained_scores(top), vec![8., 5., 2.]);
        }
    }

    #[test]
    fn test_threshold() {
        let mut top = TopScoredDocuments::new(3);
        assert_eq!(top.add(0, 0.1).unwrap(), ImpactValue::NEG_INFINITY);
        assert_eq!(top.add(1, 0.2).unwrap(), ImpactValue::NEG_INFINITY);
        assert_eq!(top.add(2, 0.3).unwrap(), 0.1);
        assert_eq!(top.add(3, 0.05).unwrap(), 0.1);
        // Equal scores do not evict
        assert_eq!(top.add(4, 0.1).unwrap(), 0.1);
        assert_eq!(top.add(5, 0.5).unwrap(), 0.2);

        let observed: Vec<DocId> = top.into_sorted_vec().iter().map(|d| d.docid).collect();
        assert_eq!(observed, vec![5, 2, 1]);
    }

    #[test]
    fn test_fewer_offers_than_top_k() {
        let mut top = TopScoredDocuments::new(10);
        top.add(3, 1.5).unwrap();
        top.add(7, 2.5).unwrap();
        let observed = top.into_sorted_vec();
        assert_eq!(
            observed,
            vec![
                ScoredDocument { docid: 7, score: 2.5 },
                ScoredDocument { docid: 3, score: 1.5 }
            ]
        );
    }

    #[test]
    fn test_zero_top_k() {
        let mut top = TopScoredDocuments::new(0);
        assert_eq!(top.add(0, 1.).unwrap(), ImpactValue::INFINITY);
        assert!(top.is_empty());
        assert!(top.into_sorted_vec().is_empty());
    }

    #[test]
    fn test_write_results() {
        let results = vec![
            ScoredDocument { docid: 12, score: 2.5 },
            ScoredDocument { docid: 3, score: 0. },
            ScoredDocument { docid: 4, score: -1. },
        ];
        let mut out = Vec::new();
        write_results(&mut out, &results).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    12 2.500000\n");
    }

    #[test]
    fn test_default_options() {
        let options = SearchOptions::default();
        assert_eq!(options.top_k, 10);
        assert_eq!(options.strategy, SearchStrategy::Merge);
    }
}
