//! TF-IDF vectorizer over word unigrams and bigrams.
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sprs::{CsMat, CsVec};
use thiserror::Error;

pub const DEFAULT_MAX_FEATURES: usize = 5000;
pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 2);

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("compile token pattern"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VectorizerError {
    #[error("empty vocabulary; the documents contain no terms")]
    EmptyVocabulary,

    #[error("invalid n-gram range ({0}, {1})")]
    InvalidNgramRange(usize, usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Keep only the most frequent terms across the fit corpus
    pub max_features: usize,
    pub ngram_range: (usize, usize),
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: DEFAULT_NGRAM_RANGE,
        }
    }
}

/// Fitted TF-IDF vectorizer. Immutable once fitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary and IDF weights from `documents`.
    pub fn fit<S: AsRef<str>>(
        documents: &[S],
        config: VectorizerConfig,
    ) -> Result<Self, VectorizerError> {
        let (min_n, max_n) = config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(VectorizerError::InvalidNgramRange(min_n, max_n));
        }

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = analyze(doc.as_ref(), config.ngram_range);
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
            for term in terms {
                *term_freq.entry(term).or_insert(0) += 1;
            }
        }

        if term_freq.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }

        // Most frequent first; ties resolved by term so the result is stable.
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Ok(Self {
            config,
            vocabulary,
            idf,
        })
    }

    /// Fit on `documents` and return their TF-IDF matrix.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        config: VectorizerConfig,
    ) -> Result<(Self, CsMat<f64>), VectorizerError> {
        let vectorizer = Self::fit(documents, config)?;
        let matrix = vectorizer.transform(documents);
        Ok((vectorizer, matrix))
    }

    #[must_use]
    pub fn vocab_len(&self) -> usize {
        self.idf.len()
    }

    #[must_use]
    pub fn config(&self) -> VectorizerConfig {
        self.config
    }

    #[must_use]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// L2-normalised TF-IDF vector for one document. Unknown terms are ignored.
    #[must_use]
    pub fn transform_document(&self, document: &str) -> CsVec<f64> {
        let (indices, data) = self.weighted_terms(document);
        CsVec::new(self.vocab_len(), indices, data)
    }

    /// CSR matrix with one L2-normalised row per document.
    #[must_use]
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> CsMat<f64> {
        let mut indptr = Vec::with_capacity(documents.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0);

        for doc in documents {
            let (row_indices, row_data) = self.weighted_terms(doc.as_ref());
            indices.extend(row_indices);
            data.extend(row_data);
            indptr.push(indices.len());
        }

        CsMat::new((documents.len(), self.vocab_len()), indptr, indices, data)
    }

    /// Sorted `(column, weight)` pairs for the non-zero entries of one row.
    fn weighted_terms(&self, document: &str) -> (Vec<usize>, Vec<f64>) {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in analyze(document, self.config.ngram_range) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        entries.into_iter().unzip()
    }
}

/// Lowercase, tokenize and expand into n-grams joined by single spaces.
fn analyze(document: &str, (min_n, max_n): (usize, usize)) -> Vec<String> {
    let lowered = document.to_lowercase();
    let tokens: Vec<&str> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect();

    let mut terms = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}
