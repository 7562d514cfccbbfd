//! Corpus loading and validation.
//!
//! A corpus is a JSON array of `{id, category, question, answer, keywords}`
//! objects, either in a single file or spread across the `*.json` files of a
//! directory tree (concatenated in path order).
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::FaqEntry;

const BUILTIN_CORPUS: &str = include_str!("../data/faqs.json");

/// The 20-entry customer-support FAQ shipped with the crate.
pub fn builtin_corpus() -> Result<Vec<FaqEntry>> {
    let entries = parse_corpus(BUILTIN_CORPUS, "built-in corpus")?;
    validate_corpus(&entries)?;
    Ok(entries)
}

/// Parse a JSON array of entries. `origin` names the source in error messages.
pub fn parse_corpus(json: &str, origin: &str) -> Result<Vec<FaqEntry>> {
    serde_json::from_str(json)
        .map_err(|e| Error::InvalidConfig(format!("malformed corpus in {}: {}", origin, e)))
}

/// Load and validate a corpus from a JSON file or a directory of JSON files.
pub fn load_corpus(path: &Path) -> Result<Vec<FaqEntry>> {
    let files = if path.is_dir() { list_json_files(path) } else { vec![path.to_path_buf()] };
    let mut entries = Vec::new();
    for file in &files {
        let content = fs::read_to_string(file)?;
        let parsed = parse_corpus(&content, &file.display().to_string())?;
        debug!(file = %file.display(), entries = parsed.len(), "loaded corpus file");
        entries.extend(parsed);
    }
    validate_corpus(&entries)?;
    Ok(entries)
}

/// Reject corpora the matcher cannot serve: empty, duplicate ids, blank question or answer.
pub fn validate_corpus(entries: &[FaqEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::InvalidConfig("corpus contains no entries".to_string()));
    }
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.id) {
            return Err(Error::InvalidConfig(format!("duplicate FAQ id {}", entry.id)));
        }
        if entry.question.trim().is_empty() {
            return Err(Error::InvalidConfig(format!("FAQ {} has an empty question", entry.id)));
        }
        if entry.answer.trim().is_empty() {
            return Err(Error::InvalidConfig(format!("FAQ {} has an empty answer", entry.id)));
        }
    }
    Ok(())
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut json_files = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable corpus path");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            json_files.push(path.to_path_buf());
        }
    }
    json_files.sort();
    json_files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, question: &str) -> FaqEntry {
        FaqEntry {
            id,
            category: "General".to_string(),
            question: question.to_string(),
            answer: "An answer.".to_string(),
            keywords: vec![],
        }
    }

    #[test]
    fn builtin_corpus_has_twenty_unique_entries() {
        let corpus = builtin_corpus().expect("builtin");
        assert_eq!(corpus.len(), 20);
        assert_eq!(corpus[0].id, 1);
        assert_eq!(corpus[0].question, "How do I reset my password?");
        assert_eq!(corpus[19].id, 20);
    }

    #[test]
    fn empty_corpus_is_a_config_error() {
        assert!(matches!(validate_corpus(&[]), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let entries = vec![entry(1, "first?"), entry(1, "second?")];
        assert!(matches!(validate_corpus(&entries), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn blank_question_is_rejected() {
        let entries = vec![entry(1, "   ")];
        assert!(validate_corpus(&entries).is_err());
    }

    #[test]
    fn missing_field_is_malformed() {
        let json = r#"[{"id": 1, "category": "x", "question": "q?", "keywords": []}]"#;
        let err = parse_corpus(json, "inline").expect_err("missing answer");
        assert!(err.to_string().contains("inline"));
    }
}
