//! Query scoring: cosine similarity of TF-IDF vectors plus a token-overlap bonus.
//!
//! `score = cosine(query, doc) + weight * overlap / max(|query|, 1)` where
//! `overlap` counts query tokens (with repeats) that occur anywhere in the
//! document. A document matches only when its score is strictly above the
//! threshold; on equal scores the earlier corpus entry wins.

use tracing::debug;

use faqbot_core::config::ScoringParams;
use faqbot_core::error::Result;
use faqbot_core::traits::AnswerMatcher;
use faqbot_core::types::{FaqEntry, FaqId, MatchResult};

use crate::index::{CorpusIndex, IndexedFaq};
use crate::normalize::normalize;
use crate::vector::{cosine_with_norms, norm, tf_idf};

/// Score breakdown for one corpus entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFaq {
    /// Position in corpus order.
    pub position: usize,
    pub id: FaqId,
    pub similarity: f64,
    pub keyword_bonus: f64,
    pub score: f64,
}

pub struct TfIdfMatcher {
    index: CorpusIndex,
    params: ScoringParams,
}

impl TfIdfMatcher {
    pub fn new(corpus: Vec<FaqEntry>) -> Result<Self> {
        Self::with_params(corpus, ScoringParams::default())
    }

    pub fn with_params(corpus: Vec<FaqEntry>, params: ScoringParams) -> Result<Self> {
        params.validate()?;
        let index = CorpusIndex::build(corpus)?;
        Ok(Self { index, params })
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Score every entry in corpus order.
    pub fn score_all(&self, query: &str) -> Vec<ScoredFaq> {
        let query_tokens = normalize(query);
        let query_vector = tf_idf(&query_tokens, self.index.stats());
        let query_norm = norm(&query_vector);

        self.index
            .documents()
            .iter()
            .enumerate()
            .map(|(position, doc)| {
                let similarity = cosine_with_norms(&query_vector, query_norm, doc.vector(), doc.norm());
                let keyword_bonus = self.keyword_bonus(&query_tokens, doc);
                ScoredFaq {
                    position,
                    id: doc.entry.id,
                    similarity,
                    keyword_bonus,
                    score: similarity + keyword_bonus,
                }
            })
            .collect()
    }

    fn keyword_bonus(&self, query_tokens: &[String], doc: &IndexedFaq) -> f64 {
        let matched = query_tokens.iter().filter(|t| doc.contains(t)).count();
        matched as f64 / query_tokens.len().max(1) as f64 * self.params.keyword_bonus_weight
    }

    fn to_match(&self, scored: &ScoredFaq) -> MatchResult {
        MatchResult::from_entry(&self.index.documents()[scored.position].entry, scored.score)
    }
}

impl AnswerMatcher for TfIdfMatcher {
    fn find_best_match(&self, query: &str) -> Option<MatchResult> {
        let mut best: Option<ScoredFaq> = None;
        let mut best_score = 0.0;
        for scored in self.score_all(query) {
            if scored.score > best_score && scored.score > self.params.threshold {
                best_score = scored.score;
                best = Some(scored);
            }
        }
        match &best {
            Some(b) => debug!(query, id = b.id, score = b.score, "best match"),
            None => debug!(query, "no match above threshold"),
        }
        best.map(|b| self.to_match(&b))
    }

    fn rank(&self, query: &str, k: usize) -> Vec<MatchResult> {
        let mut hits: Vec<ScoredFaq> = self
            .score_all(query)
            .into_iter()
            .filter(|s| s.score > self.params.threshold)
            .collect();
        // stable: equal scores stay in corpus order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(k);
        hits.iter().map(|s| self.to_match(s)).collect()
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn contains(&self, id: FaqId) -> bool {
        self.index.get(id).is_some()
    }
}
