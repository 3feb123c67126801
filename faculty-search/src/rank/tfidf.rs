//! TF-IDF vector space over research texts.
//!
//! Weights follow the usual smoothed scheme:
//!
//! ```text
//! tf'  = 1 + ln(tf)                 (sublinear)
//! idf  = ln((1 + n) / (1 + df)) + 1
//! w    = tf' * idf, rows L2-normalised
//! ```
//!
//! Vectors are sparse `(term index, weight)` lists sorted by index, so the
//! cosine of two normalised vectors is a merge-join dot product.

use std::collections::HashMap;

use crate::text::Normalizer;

/// Sparse, L2-normalised document or query vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<usize, u32>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, tf)| (index, (1.0 + f64::from(tf).ln()) * idf[index]))
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        Self { entries }
    }

    /// True when no vocabulary term occurs.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero weights.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Cosine similarity, clamped to `[0, 1]`. Zero vectors score 0.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_index, a_weight) = self.entries[i];
            let (b_index, b_weight) = other.entries[j];
            match a_index.cmp(&b_index) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        if dot.is_finite() {
            dot.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Vocabulary, IDF weights and document vectors fitted on a corpus.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
    normalizer: Normalizer,
}

impl VectorSpace {
    /// Fit the space on `texts`, keeping at most `max_features` terms.
    ///
    /// Terms are ranked by document frequency, then total frequency, then
    /// lexically; the top `max_features` form the vocabulary.
    pub fn fit<S: AsRef<str>>(texts: &[S], normalizer: Normalizer, max_features: usize) -> Self {
        let analyzed: Vec<HashMap<String, u32>> = texts
            .iter()
            .map(|text| {
                let mut counts = HashMap::new();
                for term in normalizer.analyze(text.as_ref()) {
                    *counts.entry(term).or_insert(0u32) += 1;
                }
                counts
            })
            .collect();

        // term -> (document frequency, total frequency)
        let mut stats: HashMap<&str, (u32, u64)> = HashMap::new();
        for counts in &analyzed {
            for (term, tf) in counts {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += u64::from(*tf);
            }
        }

        let mut ranked: Vec<(&str, (u32, u64))> = stats.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1 .0
                .cmp(&a.1 .0)
                .then_with(|| b.1 .1.cmp(&a.1 .1))
                .then_with(|| a.0.cmp(b.0))
        });
        ranked.truncate(max_features);
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = texts.len() as f64;
        let vocabulary: HashMap<String, usize> = ranked
            .iter()
            .enumerate()
            .map(|(index, (term, _))| ((*term).to_owned(), index))
            .collect();
        let idf: Vec<f64> = ranked
            .iter()
            .map(|(_, (df, _))| ((1.0 + n_docs) / (1.0 + f64::from(*df))).ln() + 1.0)
            .collect();

        let documents = analyzed
            .into_iter()
            .map(|counts| {
                let indexed = counts
                    .into_iter()
                    .filter_map(|(term, tf)| vocabulary.get(&term).map(|&index| (index, tf)))
                    .collect();
                SparseVector::from_counts(indexed, &idf)
            })
            .collect();

        Self {
            vocabulary,
            idf,
            documents,
            normalizer,
        }
    }

    /// Project text into this space. Out-of-vocabulary terms carry no weight.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in self.normalizer.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }
        SparseVector::from_counts(counts, &self.idf)
    }

    /// Cosine similarity of `query` against every fitted document, in corpus order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.documents.iter().map(|doc| query.cosine(doc)).collect()
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// True if `term` made it into the vocabulary.
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// IDF weight of a vocabulary term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }
}
