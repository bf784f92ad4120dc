//! Engine configuration.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes:
//!
//! ```json
//! {
//!   "model_path": "/var/lib/solace/model.slcm",
//!   "confidence_threshold": 0.6,
//!   "classifier": { "kind": "naive_bayes", "smoothing": 0.5 },
//!   "selection": { "strategy": "seeded", "seed": 42 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::AnalysisConfig;
use crate::engine::response::SelectionStrategy;
use crate::error::{Result, SolaceError};
use crate::ml::intent_classifier::{ClassifierConfig, TrainingSettings};

/// Generic replies used when no intent is recognized.
pub const DEFAULT_FALLBACK_RESPONSES: &[&str] = &[
    "I hear you, and I want to help. Could you tell me more about what you're experiencing?",
    "That sounds really challenging. I'm here to listen and support you. What's on your mind?",
    "I understand this is difficult for you. Let's talk about it more. \
     How are you feeling right now?",
    "Thank you for sharing that with me. I'm here to help. \
     What would be most helpful for you right now?",
    "I want to make sure I understand you correctly. \
     Could you explain a bit more about what you're going through?",
];

/// Reply used when a request fails internally.
pub const DEFAULT_ERROR_RESPONSE: &str = "I understand you're going through something \
     difficult. I'm here to listen and support you. How can I help you today?";

/// Configuration for a [`ResponseEngine`](crate::engine::ResponseEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where the trained model artifact is stored.
    pub model_path: PathBuf,
    /// Training corpus file. The built-in corpus is used when unset.
    pub corpus_path: Option<PathBuf>,
    /// Minimum top-intent score for a template answer.
    pub confidence_threshold: f64,
    /// Longer inputs are truncated to this many characters.
    pub max_input_chars: usize,
    pub analysis: AnalysisConfig,
    pub classifier: ClassifierConfig,
    pub selection: SelectionStrategy,
    pub fallback_responses: Vec<String>,
    pub error_response: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            model_path: PathBuf::from("./model.slcm"),
            corpus_path: None,
            confidence_threshold: 0.5,
            max_input_chars: 4096,
            analysis: AnalysisConfig::default(),
            classifier: ClassifierConfig::default(),
            selection: SelectionStrategy::default(),
            fallback_responses: DEFAULT_FALLBACK_RESPONSES
                .iter()
                .map(|text| text.to_string())
                .collect(),
            error_response: DEFAULT_ERROR_RESPONSE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SolaceError::config(format!("cannot read config {}: {e}", path.display()))
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(SolaceError::config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if self.max_input_chars == 0 {
            return Err(SolaceError::config("max_input_chars must be > 0"));
        }
        if self.fallback_responses.is_empty() {
            return Err(SolaceError::config("fallback_responses must not be empty"));
        }
        if self
            .fallback_responses
            .iter()
            .any(|text| text.trim().is_empty())
        {
            return Err(SolaceError::config(
                "fallback_responses must not contain blank entries",
            ));
        }
        if self.error_response.trim().is_empty() {
            return Err(SolaceError::config("error_response must not be blank"));
        }
        self.classifier.validate()
    }

    /// The settings persisted with, and compared against, trained models.
    pub fn training_settings(&self) -> TrainingSettings {
        TrainingSettings {
            analysis: self.analysis.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::intent_classifier::ClassifierKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.max_input_chars, 4096);
        assert_eq!(config.fallback_responses.len(), 5);
        assert_eq!(config.model_path, PathBuf::from("./model.slcm"));
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            EngineConfig {
                confidence_threshold: 1.5,
                ..EngineConfig::default()
            },
            EngineConfig {
                confidence_threshold: f64::NAN,
                ..EngineConfig::default()
            },
            EngineConfig {
                max_input_chars: 0,
                ..EngineConfig::default()
            },
            EngineConfig {
                fallback_responses: vec![],
                ..EngineConfig::default()
            },
            EngineConfig {
                fallback_responses: vec!["ok".to_string(), " ".to_string()],
                ..EngineConfig::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solace.json");
        std::fs::write(
            &path,
            r#"{
                "confidence_threshold": 0.7,
                "classifier": {"kind": "naive_bayes"},
                "selection": {"strategy": "first"}
            }"#,
        )
        .unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.confidence_threshold, 0.7);
        assert_eq!(config.selection, SelectionStrategy::First);
        assert_eq!(config.max_input_chars, 4096);
        assert_eq!(config.classifier.kind, ClassifierKind::NaiveBayes);
        assert_eq!(config.classifier.smoothing, 0.25);
        assert!(config.analysis.stop_words);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solace.json");
        std::fs::write(&path, r#"{"confidence_threshold": -0.1}"#).unwrap();

        assert!(EngineConfig::from_file(&path).is_err());
        assert!(EngineConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
