//! Layered configuration and path helpers.
//!
//! Built-in defaults, then `config.toml`, then `config.<env>.toml` (env taken
//! from `RUST_ENV`, `dev` when unset), then `FAQBOT_*` environment variables
//! with `__` separating nested keys (`FAQBOT_MATCHER__THRESHOLD=0.2`).
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const DEFAULT_KEYWORD_BONUS_WEIGHT: f64 = 0.3;
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_MAX_QUERY_CHARS: usize = 500;

/// Knobs of the similarity scorer. Defaults reproduce the reference behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// A document must score strictly above this to match.
    pub threshold: f64,
    /// Multiplier on the query-side token overlap ratio.
    pub keyword_bonus_weight: f64,
    /// Default result count for ranked listings.
    pub top_k: usize,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            keyword_bonus_weight: DEFAULT_KEYWORD_BONUS_WEIGHT,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl ScoringParams {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "matcher.threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if !self.keyword_bonus_weight.is_finite() || self.keyword_bonus_weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "matcher.keyword_bonus_weight must be a non-negative number, got {}",
                self.keyword_bonus_weight
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("matcher.top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub max_query_chars: usize,
    pub fallback_responses: Vec<String>,
    pub suggested_questions: Vec<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
            fallback_responses: vec![
                "I'm not sure about that specific question, but I'd be happy to help! You can browse our FAQ database or try rephrasing your question.".to_string(),
                "I couldn't find a specific answer to your question. Please contact our support team at support@company.com or call 1-800-123-4567 for personalized assistance.".to_string(),
                "That's a great question! While I don't have that exact information, you can explore our FAQ categories or reach out to our customer support team.".to_string(),
                "I apologize, but I don't have information about that topic. Our support team would be better equipped to help you with this specific question.".to_string(),
            ],
            suggested_questions: vec![
                "How do I reset my password?".to_string(),
                "How can I track my order?".to_string(),
                "What payment methods do you accept?".to_string(),
                "What is your return policy?".to_string(),
                "How do I contact support?".to_string(),
            ],
        }
    }
}

impl ChatSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_query_chars == 0 {
            return Err(Error::InvalidConfig("chat.max_query_chars must be at least 1".to_string()));
        }
        if self.fallback_responses.iter().all(|r| r.trim().is_empty()) {
            return Err(Error::InvalidConfig(
                "chat.fallback_responses needs at least one non-empty line".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusSettings {
    /// JSON file or directory of JSON files; the built-in corpus when absent.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub matcher: ScoringParams,
    pub chat: ChatSettings,
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load from the current working directory.
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir()?;
        Self::load_from(&cwd)
    }

    /// Load with `config*.toml` looked up under `base_dir`.
    pub fn load_from(base_dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base_dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base_dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base_dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base_dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("FAQBOT_").split("__"));

        Self::from_figment(figment, base_dir)
    }

    /// Wrap an already-assembled figment. Settings are validated eagerly.
    pub fn from_figment(figment: Figment, base_dir: &Path) -> Result<Self> {
        let config = Self { figment, base_dir: base_dir.to_path_buf() };
        let settings = config.settings()?;
        settings.matcher.validate()?;
        settings.chat.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn scoring(&self) -> Result<ScoringParams> {
        Ok(self.settings()?.matcher)
    }

    pub fn chat(&self) -> Result<ChatSettings> {
        Ok(self.settings()?.chat)
    }

    /// Configured corpus location, expanded and resolved against the config directory.
    pub fn corpus_path(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .settings()?
            .corpus
            .path
            .map(|p| resolve_with_base(&self.base_dir, p)))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let params = ScoringParams::default();
        assert_eq!(params.threshold, 0.1);
        assert_eq!(params.keyword_bonus_weight, 0.3);
        assert!(params.validate().is_ok());
        assert!(ChatSettings::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let params = ScoringParams { threshold: 1.5, ..ScoringParams::default() };
        assert!(matches!(params.validate(), Err(Error::InvalidConfig(_))));
        let params = ScoringParams { keyword_bonus_weight: -0.1, ..ScoringParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn figment_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::string("[matcher]\nthreshold = 0.25\n"));
        let config = Config::from_figment(figment, Path::new("/srv/faq")).expect("config");
        let scoring = config.scoring().expect("scoring");
        assert_eq!(scoring.threshold, 0.25);
        assert_eq!(scoring.keyword_bonus_weight, 0.3, "untouched keys keep defaults");
        assert_eq!(config.corpus_path().expect("path"), None);
    }

    #[test]
    fn relative_corpus_path_resolves_against_base() {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::string("[corpus]\npath = \"data/faqs.json\"\n"));
        let config = Config::from_figment(figment, Path::new("/srv/faq")).expect("config");
        assert_eq!(
            config.corpus_path().expect("path"),
            Some(PathBuf::from("/srv/faq/data/faqs.json"))
        );
    }

    #[test]
    fn invalid_values_fail_at_load() {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::string("[chat]\nmax_query_chars = 0\n"));
        assert!(Config::from_figment(figment, Path::new(".")).is_err());
    }
}
