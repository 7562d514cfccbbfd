//! TF-IDF weighting and cosine similarity over sparse term maps.
use std::collections::{BTreeMap, HashMap, HashSet};

/// Token to weight. Ordered so floating-point sums are reproducible.
pub type TermVector = BTreeMap<String, f64>;

/// Document-frequency statistics over a fixed set of token lists.
#[derive(Debug, Clone, Default)]
pub struct DocumentFrequencies {
    counts: HashMap<String, usize>,
    total: usize,
}

impl DocumentFrequencies {
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total = 0;
        for tokens in documents {
            total += 1;
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *counts.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        Self { counts, total }
    }

    /// Number of documents containing `term` at least once.
    pub fn df(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn document_count(&self) -> usize {
        self.total
    }

    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// `ln(N / (df + 1))`. Negative for terms present in every document.
    pub fn idf(&self, term: &str) -> f64 {
        (self.total as f64 / (self.df(term) as f64 + 1.0)).ln()
    }
}

/// Relative term frequency times idf. Empty input gives an empty vector.
pub fn tf_idf(tokens: &[String], stats: &DocumentFrequencies) -> TermVector {
    let mut vector = TermVector::new();
    if tokens.is_empty() {
        return vector;
    }
    for token in tokens {
        *vector.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    let len = tokens.len() as f64;
    for (term, weight) in vector.iter_mut() {
        *weight = (*weight / len) * stats.idf(term);
    }
    vector
}

/// L2 norm of a term vector.
pub fn norm(vector: &TermVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Cosine similarity; 0 when either side has zero norm.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    cosine_with_norms(a, norm(a), b, norm(b))
}

pub(crate) fn cosine_with_norms(a: &TermVector, norm_a: f64, b: &TermVector, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum();
    dot / (norm_a * norm_b)
}
