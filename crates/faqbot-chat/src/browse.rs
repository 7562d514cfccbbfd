use faqbot_core::types::{CategorySummary, FaqEntry};

/// Category and free-text filter over the raw corpus.
///
/// `category` must match exactly; `search` is a case-insensitive substring
/// test against question, answer and every keyword. Unset or blank fields
/// match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl FaqFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, entry: &FaqEntry) -> bool {
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if entry.category != category {
                return false;
            }
        }
        let term = match self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => term.to_lowercase(),
            None => return true,
        };
        entry.question.to_lowercase().contains(&term)
            || entry.answer.to_lowercase().contains(&term)
            || entry.keywords.iter().any(|k| k.to_lowercase().contains(&term))
    }

    pub fn apply<'a>(&self, corpus: &'a [FaqEntry]) -> Vec<&'a FaqEntry> {
        corpus.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct categories in first-seen order with their entry counts.
pub fn categories(corpus: &[FaqEntry]) -> Vec<CategorySummary> {
    let mut out: Vec<CategorySummary> = Vec::new();
    for entry in corpus {
        match out.iter_mut().find(|c| c.name == entry.category) {
            Some(summary) => summary.count += 1,
            None => out.push(CategorySummary { name: entry.category.clone(), count: 1 }),
        }
    }
    out
}
