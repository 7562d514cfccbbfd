use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use faqbot_core::config::{ChatSettings, Config};
use faqbot_core::corpus::{builtin_corpus, load_corpus, validate_corpus};
use faqbot_core::error::{Error, Result};
use faqbot_core::traits::AnswerMatcher;
use faqbot_core::types::{CategorySummary, FaqEntry, FaqId, MatchResult};
use faqbot_text::TfIdfMatcher;

use crate::browse::{categories, FaqFilter};

/// Confidence attached to fallback replies.
pub const FALLBACK_CONFIDENCE: f64 = 0.1;

/// What the assistant says back to one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub confidence: f64,
    /// Matched entry; `None` for a fallback.
    pub faq_id: Option<FaqId>,
    pub category: Option<String>,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.faq_id.is_none()
    }

    fn matched(m: MatchResult) -> Self {
        Self { text: m.answer, confidence: m.confidence, faq_id: Some(m.id), category: Some(m.category) }
    }
}

/// Decode a raw query read from a byte stream. Rejects invalid UTF-8.
pub fn decode_query(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw).map_err(|e| Error::InvalidInput(format!("query is not valid UTF-8: {}", e)))
}

/// FAQ assistant over any matcher. The matcher is injected, never global.
pub struct FaqAssistant<M: AnswerMatcher> {
    matcher: M,
    corpus: Vec<FaqEntry>,
    settings: ChatSettings,
    fallbacks: Vec<String>,
    next_fallback: AtomicUsize,
}

impl FaqAssistant<TfIdfMatcher> {
    /// Corpus from `corpus.path` (built-in when unset), scoring and chat settings from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let corpus = match config.corpus_path()? {
            Some(path) => {
                info!(path = %path.display(), "loading corpus");
                load_corpus(&path)?
            }
            None => {
                info!("using built-in corpus");
                builtin_corpus()?
            }
        };
        let matcher = TfIdfMatcher::with_params(corpus.clone(), config.scoring()?)?;
        Self::new(matcher, corpus, config.chat()?)
    }

    pub fn with_builtin_corpus() -> Result<Self> {
        let corpus = builtin_corpus()?;
        let matcher = TfIdfMatcher::new(corpus.clone())?;
        Self::new(matcher, corpus, ChatSettings::default())
    }
}

impl<M: AnswerMatcher> FaqAssistant<M> {
    /// `corpus` must be the entries `matcher` was built over, so every id it
    /// answers with can be looked up again.
    pub fn new(matcher: M, corpus: Vec<FaqEntry>, settings: ChatSettings) -> Result<Self> {
        settings.validate()?;
        validate_corpus(&corpus)?;
        if matcher.len() != corpus.len() {
            return Err(Error::InvalidConfig(format!(
                "matcher indexes {} entries but the corpus has {}",
                matcher.len(),
                corpus.len()
            )));
        }
        if let Some(entry) = corpus.iter().find(|e| !matcher.contains(e.id)) {
            return Err(Error::InvalidConfig(format!("FAQ {} is not indexed by the matcher", entry.id)));
        }
        let fallbacks = settings
            .fallback_responses
            .iter()
            .filter(|r| !r.trim().is_empty())
            .cloned()
            .collect();
        Ok(Self { matcher, corpus, settings, fallbacks, next_fallback: AtomicUsize::new(0) })
    }

    /// Answer a query, falling back to a canned line when nothing clears the threshold.
    ///
    /// Blank queries and queries longer than `chat.max_query_chars` are
    /// rejected with `InvalidInput`.
    pub fn ask(&self, query: &str) -> Result<Reply> {
        let query = self.check_query(query)?;
        match self.matcher.find_best_match(query) {
            Some(m) => {
                debug!(id = m.id, confidence = m.confidence, "answered from FAQ");
                Ok(Reply::matched(m))
            }
            None => {
                debug!("no FAQ matched, using fallback");
                Ok(self.fallback())
            }
        }
    }

    /// Up to `k` ranked candidates for "did you mean" style listings.
    /// Same input rules as [`ask`](Self::ask).
    pub fn candidates(&self, query: &str, k: usize) -> Result<Vec<MatchResult>> {
        let query = self.check_query(query)?;
        Ok(self.matcher.rank(query, k))
    }

    pub fn get(&self, id: FaqId) -> Result<&FaqEntry> {
        self.corpus
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::NotFound(format!("FAQ {}", id)))
    }

    pub fn browse(&self, filter: &FaqFilter) -> Vec<&FaqEntry> {
        filter.apply(&self.corpus)
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        categories(&self.corpus)
    }

    pub fn suggested_questions(&self) -> &[String] {
        &self.settings.suggested_questions
    }

    pub fn corpus(&self) -> &[FaqEntry] {
        &self.corpus
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    fn check_query<'q>(&self, query: &'q str) -> Result<&'q str> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("query is empty".to_string()));
        }
        let chars = query.chars().count();
        if chars > self.settings.max_query_chars {
            return Err(Error::InvalidInput(format!(
                "query is {} characters, limit is {}",
                chars, self.settings.max_query_chars
            )));
        }
        Ok(query)
    }

    // Rotates through the configured lines.
    fn fallback(&self) -> Reply {
        let n = self.next_fallback.fetch_add(1, Ordering::Relaxed);
        let text = self.fallbacks[n % self.fallbacks.len()].clone();
        Reply { text, confidence: FALLBACK_CONFIDENCE, faq_id: None, category: None }
    }
}
