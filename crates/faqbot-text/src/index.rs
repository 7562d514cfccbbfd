use std::collections::HashSet;

use tracing::info;

use faqbot_core::corpus::validate_corpus;
use faqbot_core::error::Result;
use faqbot_core::types::{FaqEntry, FaqId};

use crate::normalize::normalize;
use crate::vector::{norm, tf_idf, DocumentFrequencies, TermVector};

/// A corpus entry with its normalized tokens and cached TF-IDF vector.
#[derive(Debug, Clone)]
pub struct IndexedFaq {
    pub entry: FaqEntry,
    /// Question tokens followed by each keyword's tokens, flattened.
    pub tokens: Vec<String>,
    token_set: HashSet<String>,
    vector: TermVector,
    norm: f64,
}

impl IndexedFaq {
    pub fn contains(&self, token: &str) -> bool {
        self.token_set.contains(token)
    }

    pub fn vector(&self) -> &TermVector {
        &self.vector
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }
}

/// Normalized view of a fixed corpus, built once and never mutated.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    docs: Vec<IndexedFaq>,
    stats: DocumentFrequencies,
}

impl CorpusIndex {
    /// Normalize every entry and precompute document vectors.
    ///
    /// Fails with `InvalidConfig` on an empty corpus, duplicate ids or blank
    /// question/answer fields.
    pub fn build(corpus: Vec<FaqEntry>) -> Result<Self> {
        validate_corpus(&corpus)?;

        let token_lists: Vec<Vec<String>> = corpus.iter().map(document_tokens).collect();
        let stats = DocumentFrequencies::from_documents(token_lists.iter().map(Vec::as_slice));

        let docs: Vec<IndexedFaq> = corpus
            .into_iter()
            .zip(token_lists)
            .map(|(entry, tokens)| {
                let vector = tf_idf(&tokens, &stats);
                let norm = norm(&vector);
                let token_set = tokens.iter().cloned().collect();
                IndexedFaq { entry, tokens, token_set, vector, norm }
            })
            .collect();

        info!(
            documents = docs.len(),
            vocabulary = stats.vocabulary_size(),
            "corpus index built"
        );
        Ok(Self { docs, stats })
    }

    pub fn documents(&self) -> &[IndexedFaq] {
        &self.docs
    }

    pub fn stats(&self) -> &DocumentFrequencies {
        &self.stats
    }

    pub fn get(&self, id: FaqId) -> Option<&IndexedFaq> {
        self.docs.iter().find(|d| d.entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// `normalize(question) ++ flatten(normalize(k) for k in keywords)`.
pub fn document_tokens(entry: &FaqEntry) -> Vec<String> {
    let mut tokens = normalize(&entry.question);
    for keyword in &entry.keywords {
        tokens.extend(normalize(keyword));
    }
    tokens
}
