//! Domain types shared by the matcher and the assistant.

use serde::{Deserialize, Serialize};

pub type FaqId = u32;

/// A canned question/answer pair.
///
/// - `id`: unique within a corpus
/// - `category`: display grouping (e.g. "Account & Login")
/// - `question`: the canonical phrasing, indexed for matching
/// - `answer`: returned verbatim on a match, never indexed
/// - `keywords`: extra phrases indexed alongside the question; order is irrelevant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: FaqId,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
}

/// Best (or ranked) match for a query.
///
/// `score` is the raw similarity plus keyword bonus and may exceed 1.0;
/// `confidence` is `score` clamped to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: FaqId,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub score: f64,
    pub confidence: f64,
}

impl MatchResult {
    pub fn from_entry(entry: &FaqEntry, score: f64) -> Self {
        Self {
            id: entry.id,
            category: entry.category.clone(),
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            score,
            confidence: score.min(1.0),
        }
    }
}

/// A category label with the number of entries filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}
