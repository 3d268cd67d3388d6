use std::collections::HashMap;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::documents::{create_document, document_vectors, TestDocument};
use impact_rank::{
    base::{DocId, ImpactValue, TermImpact, TermIndex},
    builder::{Indexer, MemoryIndex},
    search::ScoredDocument,
};

pub struct TestIndex {
    pub vocabulary_size: usize,
    pub all_terms: HashMap<TermIndex, Vec<TermImpact>>,
    pub index: MemoryIndex,
    pub documents: Vec<TestDocument>,
}

impl TestIndex {
    pub fn new(
        vocabulary_size: usize,
        document_count: usize,
        lambda_words: f64,
        max_words: usize,
        seed: Option<u64>,
    ) -> Self {
        let mut indexer = Indexer::new();

        let mut all_terms = HashMap::<TermIndex, Vec<TermImpact>>::new();
        let mut documents = Vec::<TestDocument>::new();
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        for ix in 0..document_count {
            let docid = ix as DocId;
            let document = create_document(lambda_words, max_words, vocabulary_size, &mut rng);

            let (terms, values) = document_vectors(&document);
            indexer
                .add(docid, &terms, &values)
                .expect("Error while adding terms to the index");

            for term in document.terms.iter() {
                all_terms.entry(term.term_ix).or_default().push(TermImpact {
                    docid,
                    value: term.weight,
                });
            }

            documents.push(document);
        }

        debug!(
            "Built a test index with {} documents and {} terms",
            document_count,
            all_terms.len()
        );
        Self {
            vocabulary_size,
            all_terms,
            index: indexer
                .into_index()
                .expect("Error while building the index"),
            documents,
        }
    }

    /// Picks `count` random terms (possibly unknown to the index)
    pub fn random_query(&self, count: usize, seed: u64) -> Vec<TermIndex> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| rng.gen_range(0..self.vocabulary_size + 2))
            .collect()
    }

    /// Ranks all the documents by sorting their scores, dropping documents
    /// without a positive score
    pub fn expected_results(&self, query: &[TermIndex], top_k: usize) -> Vec<ScoredDocument> {
        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .enumerate()
            .map(|(docid, document)| ScoredDocument {
                docid: docid as DocId,
                score: document.score(query),
            })
            .filter(|d| d.score > 0.)
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        scored
    }
}

/// Keeps only the results with a positive score
pub fn positive(results: Vec<ScoredDocument>) -> Vec<ScoredDocument> {
    results.into_iter().filter(|d| d.score > 0.).collect()
}

/// Total score of a document computed from the reference postings
pub fn reference_score(
    all_terms: &HashMap<TermIndex, Vec<TermImpact>>,
    query: &[TermIndex],
    docid: DocId,
) -> ImpactValue {
    query
        .iter()
        .filter_map(|t| all_terms.get(t))
        .flat_map(|list| list.iter().filter(|ti| ti.docid == docid))
        .map(|ti| ti.value)
        .sum()
}
