use ndarray::Array1;
use rand::{self, RngCore};
use rand_distr::{Distribution, LogNormal, Poisson};
use std::cmp::min;

use impact_rank::base::{ImpactValue, TermIndex};

pub struct TermWeight {
    pub term_ix: TermIndex,
    pub weight: ImpactValue,
}

pub struct TestDocument {
    pub terms: Vec<TermWeight>,
}

impl TestDocument {
    /// Sum of the partial scores of the query terms
    pub fn score(&self, query: &[TermIndex]) -> ImpactValue {
        query
            .iter()
            .map(|term_ix| {
                self.terms
                    .iter()
                    .filter(|tw| tw.term_ix == *term_ix)
                    .map(|tw| tw.weight)
                    .sum::<ImpactValue>()
            })
            .sum()
    }
}

/// Creates a random document with (on average) `lambda_words` distinct
/// terms, each with a log-normal partial score
pub fn create_document(
    lambda_words: f64,
    max_words: usize,
    vocabulary_size: usize,
    rng: &mut dyn RngCore,
) -> TestDocument {
    let poi = Poisson::new(lambda_words).unwrap();
    let num_words = 1 + poi.sample(rng) as usize;

    let term_ids = rand::seq::index::sample(
        rng,
        vocabulary_size,
        min(min(num_words, max_words), vocabulary_size),
    )
    .into_vec();
    let log_normal = LogNormal::new(0., 1.).unwrap();

    TestDocument {
        terms: term_ids
            .into_iter()
            .map(|term_ix| TermWeight {
                term_ix,
                weight: log_normal.sample(rng),
            })
            .collect(),
    }
}

pub fn document_vectors(document: &TestDocument) -> (Array1<TermIndex>, Array1<ImpactValue>) {
    let terms = Array1::from_iter(document.terms.iter().map(|tw| tw.term_ix));
    let values = Array1::from_iter(document.terms.iter().map(|tw| tw.weight));

    (terms, values)
}
