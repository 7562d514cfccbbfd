//! Text normalization: lowercase, strip punctuation, split, drop stop words, stem.
//!
//! Word characters are ASCII letters, digits and `_`. Anything else that is
//! not whitespace becomes a token boundary, so "won't" yields "won" and "t".

/// English function words removed before stemming. Matched exactly against
/// lowercased tokens.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "i", "you", "your", "my", "me",
    "we", "us", "can", "could", "would", "should", "do", "does", "did", "have", "had", "this",
    "these", "they", "them", "their", "what", "where", "when", "why", "how",
];

/// Suffixes tried in order; the first applicable one is stripped.
pub const SUFFIXES: &[&str] = &["ings", "ing", "ed", "er", "est", "ly", "s"];

/// Lowercase and split into raw tokens. Punctuation separates words.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Strip the first matching suffix if the token is longer than `suffix + 2`.
pub fn stem(word: &str) -> &str {
    for suffix in SUFFIXES {
        if word.ends_with(suffix) && word.len() > suffix.len() + 2 {
            return &word[..word.len() - suffix.len()];
        }
    }
    word
}

/// Full pipeline. Token order follows the input.
pub fn normalize(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .map(|token| stem(&token).to_string())
        .collect()
}

// Tokens only ever hold ASCII, so byte slicing in `stem` is on char boundaries.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
