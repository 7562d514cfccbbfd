use crate::types::{FaqId, MatchResult};

/// Free-text query to canned answer.
///
/// Implementations are immutable after construction, so a single instance can
/// be shared across threads without locking.
pub trait AnswerMatcher: Send + Sync {
    /// Best match above the threshold, first-seen wins on ties.
    fn find_best_match(&self, query: &str) -> Option<MatchResult>;

    /// Up to `k` matches above the threshold, best first.
    fn rank(&self, query: &str, k: usize) -> Vec<MatchResult>;

    /// Number of indexed entries.
    fn len(&self) -> usize;

    /// Whether an entry with this id is indexed.
    fn contains(&self, id: FaqId) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
