//! faqbot-text
//!
//! Bag-of-words matching of free-text questions against a fixed FAQ corpus:
//! `normalize` turns text into stemmed tokens, `CorpusIndex` caches the
//! normalized corpus, `TfIdfMatcher` scores a query against it.
pub mod index;
pub mod normalize;
pub mod scorer;
pub mod vector;

pub use index::{CorpusIndex, IndexedFaq};
pub use normalize::normalize;
pub use scorer::{ScoredFaq, TfIdfMatcher};
pub use vector::{cosine_similarity, tf_idf, DocumentFrequencies, TermVector};
