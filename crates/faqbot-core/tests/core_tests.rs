use std::fs;
use tempfile::TempDir;

use faqbot_core::config::Config;
use faqbot_core::corpus::load_corpus;
use faqbot_core::error::Error;

const ONE_ENTRY: &str = r#"[
  {"id": 1, "category": "General", "question": "Where are you?", "answer": "Here.", "keywords": ["location"]}
]"#;

const TWO_ENTRIES: &str = r#"[
  {"id": 2, "category": "General", "question": "When are you open?", "answer": "Always.", "keywords": ["hours"]},
  {"id": 3, "category": "Billing", "question": "Can I pay later?", "answer": "Yes.", "keywords": []}
]"#;

#[test]
fn load_corpus_single_file() {
    let tmp = TempDir::new().unwrap();
    let file_path = tmp.path().join("faqs.json");
    fs::write(&file_path, ONE_ENTRY).unwrap();

    let corpus = load_corpus(&file_path).expect("load");

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].keywords, vec!["location".to_string()]);
}

#[test]
fn load_corpus_directory_concatenates_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("a.json"), ONE_ENTRY).unwrap();
    fs::write(dir.join("nested/b.json"), TWO_ENTRIES).unwrap();
    fs::write(dir.join("notes.txt"), "not a corpus").unwrap();

    let corpus = load_corpus(dir).expect("load dir");

    let ids: Vec<u32> = corpus.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3], "a.json first, then nested/b.json; .txt ignored");
}

#[test]
fn load_corpus_rejects_duplicates_across_files() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("a.json"), ONE_ENTRY).unwrap();
    fs::write(dir.join("b.json"), ONE_ENTRY).unwrap();

    assert!(matches!(load_corpus(dir), Err(Error::InvalidConfig(_))));
}

#[test]
fn load_corpus_empty_directory_is_config_error() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(load_corpus(tmp.path()), Err(Error::InvalidConfig(_))));
}

#[test]
fn config_file_values_are_layered_over_defaults() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(
        dir.join("config.toml"),
        "[corpus]\npath = \"faqs.json\"\n\n[matcher]\nkeyword_bonus_weight = 0.5\n",
    )
    .unwrap();

    let config = Config::load_from(dir).expect("config");
    let scoring = config.scoring().expect("scoring");

    assert_eq!(scoring.keyword_bonus_weight, 0.5);
    assert_eq!(scoring.threshold, 0.1);
    assert_eq!(config.corpus_path().expect("path"), Some(dir.join("faqs.json")));
    assert_eq!(config.chat().expect("chat").max_query_chars, 500);
}
