//! Configured text normalizer.
//!
//! [`Normalizer`] is the single entry point that training and inference
//! share. It assembles a [`PipelineAnalyzer`] from an [`AnalysisConfig`]:
//!
//! ```text
//! Tokenizer → Lowercase → [Stop] → [Stem] → RemoveEmpty
//! ```
//!
//! # Examples
//!
//! ```
//! use solace::analysis::normalizer::{AnalysisConfig, Normalizer};
//!
//! let normalizer = Normalizer::new(&AnalysisConfig::default()).unwrap();
//! let tokens = normalizer.normalize("I'm STRESSED about my exams!!").unwrap();
//! assert_eq!(tokens, vec!["i", "m", "stress", "about", "my", "exam"]);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, RemoveEmptyFilter, StemFilter, StopFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, UnicodeWordTokenizer};
use crate::error::Result;

/// Which tokenizer splits raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Runs of letters, marks and digits.
    #[default]
    Regex,
    /// Unicode (UAX #29) word boundaries.
    UnicodeWord,
}

/// Configuration of the normalization pipeline.
///
/// The configuration is persisted with every trained model; an artifact
/// trained under different settings is treated as stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tokenizer used for the first stage.
    pub tokenizer: TokenizerKind,
    /// Apply the light English stemmer.
    pub stemming: bool,
    /// Drop English stop words.
    pub stop_words: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            tokenizer: TokenizerKind::Regex,
            stemming: true,
            stop_words: true,
        }
    }
}

/// Turns raw text into a canonical token sequence.
///
/// Deterministic and pure: equal input always yields equal output.
#[derive(Clone, Debug)]
pub struct Normalizer {
    config: AnalysisConfig,
    analyzer: PipelineAnalyzer,
}

impl Normalizer {
    /// Build the pipeline described by `config`.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
            TokenizerKind::Regex => Arc::new(RegexTokenizer::new()?),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        };

        let mut analyzer =
            PipelineAnalyzer::new(tokenizer).add_filter(Arc::new(LowercaseFilter::new()));
        if config.stop_words {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
        }
        if config.stemming {
            analyzer = analyzer.add_filter(Arc::new(StemFilter::new()));
        }
        analyzer = analyzer.add_filter(Arc::new(RemoveEmptyFilter::new()));

        Ok(Normalizer {
            config: config.clone(),
            analyzer,
        })
    }

    /// Normalize `text` into tokens. Empty or punctuation-only input yields
    /// an empty sequence.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// The configuration this normalizer was built from.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The underlying analysis pipeline.
    pub fn analyzer(&self) -> &PipelineAnalyzer {
        &self.analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_normalizer() -> Normalizer {
        Normalizer::new(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_lowercases_and_splits_on_punctuation() {
        let normalizer = default_normalizer();
        let tokens = normalizer.normalize("Hello,WORLD...again").unwrap();

        assert_eq!(tokens, vec!["hello", "world", "again"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let normalizer = default_normalizer();

        assert!(normalizer.normalize("").unwrap().is_empty());
        assert!(normalizer.normalize("   \t\n ").unwrap().is_empty());
        assert!(normalizer.normalize("?!... ,,; --").unwrap().is_empty());
    }

    #[test]
    fn test_stemming_folds_inflections() {
        let normalizer = default_normalizer();

        assert_eq!(
            normalizer.normalize("studies exams running").unwrap(),
            vec!["study", "exam", "run"]
        );
    }

    #[test]
    fn test_stemming_disabled() {
        let config = AnalysisConfig {
            stemming: false,
            stop_words: false,
            ..AnalysisConfig::default()
        };
        let normalizer = Normalizer::new(&config).unwrap();

        assert_eq!(normalizer.normalize("Exams").unwrap(), vec!["exams"]);
        assert_eq!(
            normalizer.analyzer().stage_names(),
            vec!["regex", "lowercase", "remove_empty"]
        );
    }

    #[test]
    fn test_default_pipeline_drops_stop_words() {
        let normalizer = default_normalizer();

        assert_eq!(
            normalizer.analyzer().stage_names(),
            vec!["regex", "lowercase", "stop", "stem", "remove_empty"]
        );
        assert!(normalizer.normalize("the the the").unwrap().is_empty());
        assert_eq!(
            normalizer.normalize("I cannot sleep at night").unwrap(),
            vec!["i", "cannot", "sleep", "night"]
        );
    }

    #[test]
    fn test_stop_words_keep_negation() {
        let config = AnalysisConfig {
            stemming: false,
            ..AnalysisConfig::default()
        };
        let normalizer = Normalizer::new(&config).unwrap();

        let tokens = normalizer.normalize("I do not want the pain").unwrap();
        assert!(tokens.contains(&"not".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
    }

    #[test]
    fn test_unicode_word_tokenizer_keeps_contractions() {
        let config = AnalysisConfig {
            tokenizer: TokenizerKind::UnicodeWord,
            stemming: false,
            ..AnalysisConfig::default()
        };
        let normalizer = Normalizer::new(&config).unwrap();

        assert_eq!(
            normalizer.normalize("I can't sleep").unwrap(),
            vec!["i", "can't", "sleep"]
        );
    }

    #[test]
    fn test_deterministic() {
        let normalizer = default_normalizer();
        let text = "Je suis très fatigué 😴, I can't focus!";

        assert_eq!(
            normalizer.normalize(text).unwrap(),
            normalizer.normalize(text).unwrap()
        );
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"stop_words": false}"#).unwrap();

        assert_eq!(config.tokenizer, TokenizerKind::Regex);
        assert!(config.stemming);
        assert!(!config.stop_words);

        let config: AnalysisConfig =
            serde_json::from_str(r#"{"tokenizer": "unicode_word"}"#).unwrap();
        assert_eq!(config.tokenizer, TokenizerKind::UnicodeWord);
    }
}
