//! Exhaustive search over a dense score array

use log::debug;
use ndarray::Array1;

use crate::{
    base::{DocId, ImpactValue, TermIndex},
    error::{Error, Result},
    index::PostingIndex,
    search::{ScoredDocument, TopScoredDocuments},
};

/// Sums the partial scores of the query terms for every document
pub fn accumulate_scores(
    index: &dyn PostingIndex,
    query: &[TermIndex],
) -> Result<Array1<ImpactValue>> {
    let num_docs = index.num_docs();
    let mut scores = Array1::<ImpactValue>::zeros(num_docs);

    for &ix in query.iter() {
        if ix >= index.len() {
            debug!("Discarding term with index {}", ix);
            continue;
        }

        for impact in index.postings(ix) {
            let score = usize::try_from(impact.docid)
                .ok()
                .and_then(|docid| scores.get_mut(docid))
                .ok_or(Error::DocumentOutOfRange {
                    docid: impact.docid,
                    num_docs,
                })?;
            *score += impact.value;
        }
    }

    Ok(scores)
}

/// Search by scoring every document of the index
pub fn search_full_scan(
    index: &dyn PostingIndex,
    query: &[TermIndex],
    top_k: usize,
) -> Result<Vec<ScoredDocument>> {
    let scores = accumulate_scores(index, query)?;
    debug!("Selecting top-{} among {} documents", top_k, scores.len());

    let mut results = TopScoredDocuments::new(top_k);
    for (docid, &score) in scores.iter().enumerate() {
        results.add(docid as DocId, score)?;
    }

    Ok(results.into_sorted_vec())
}
