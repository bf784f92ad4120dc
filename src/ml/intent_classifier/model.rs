//! Persistable classifier model and its configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError, TrainingFailure};
use crate::ml::intent_classifier::classifier::Classifier;
use crate::ml::intent_classifier::logistic::{LogisticParams, LogisticRegressionModel};
use crate::ml::intent_classifier::naive_bayes::NaiveBayesModel;
use crate::ml::intent_classifier::types::IntentDistribution;
use crate::ml::intent_classifier::vectorizer::FeatureVector;

/// Which estimator to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    NaiveBayes,
    #[default]
    LogisticRegression,
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::NaiveBayes => write!(f, "naive_bayes"),
            ClassifierKind::LogisticRegression => write!(f, "logistic_regression"),
        }
    }
}

/// Classifier training settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub kind: ClassifierKind,
    /// Additive smoothing for Naive Bayes.
    pub smoothing: f64,
    /// Gradient descent step for logistic regression.
    pub learning_rate: f64,
    /// Gradient descent iterations for logistic regression.
    pub iterations: usize,
    /// L2 regularization for logistic regression.
    pub l2_penalty: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let params = LogisticParams::default();
        ClassifierConfig {
            kind: ClassifierKind::LogisticRegression,
            smoothing: 0.25,
            learning_rate: params.learning_rate,
            iterations: params.iterations,
            l2_penalty: params.l2_penalty,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(SolaceError::config(format!(
                "classifier.smoothing must be > 0, got {}",
                self.smoothing
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(SolaceError::config(format!(
                "classifier.learning_rate must be > 0, got {}",
                self.learning_rate
            )));
        }
        if !self.l2_penalty.is_finite() || self.l2_penalty < 0.0 {
            return Err(SolaceError::config(format!(
                "classifier.l2_penalty must be >= 0, got {}",
                self.l2_penalty
            )));
        }
        Ok(())
    }

    pub fn logistic_params(&self) -> LogisticParams {
        LogisticParams {
            learning_rate: self.learning_rate,
            iterations: self.iterations,
            l2_penalty: self.l2_penalty,
        }
    }
}

/// A trained classifier in persistable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassifierModel {
    NaiveBayes(NaiveBayesModel),
    LogisticRegression(LogisticRegressionModel),
    /// The degraded model: knows no intents and predicts an empty distribution.
    Untrained,
}

impl ClassifierModel {
    /// Train the estimator selected by `config`.
    pub fn train(
        config: &ClassifierConfig,
        features: &[FeatureVector],
        labels: &[String],
    ) -> std::result::Result<Self, TrainingFailure> {
        match config.kind {
            ClassifierKind::NaiveBayes => Ok(ClassifierModel::NaiveBayes(NaiveBayesModel::train(
                features,
                labels,
                config.smoothing,
            )?)),
            ClassifierKind::LogisticRegression => Ok(ClassifierModel::LogisticRegression(
                LogisticRegressionModel::train(features, labels, &config.logistic_params())?,
            )),
        }
    }

    pub fn is_trained(&self) -> bool {
        !matches!(self, ClassifierModel::Untrained)
    }
}

impl Classifier for ClassifierModel {
    fn predict(&self, features: &FeatureVector) -> Result<IntentDistribution> {
        match self {
            ClassifierModel::NaiveBayes(model) => model.predict(features),
            ClassifierModel::LogisticRegression(model) => model.predict(features),
            ClassifierModel::Untrained => Ok(IntentDistribution::empty()),
        }
    }

    fn intents(&self) -> &[String] {
        match self {
            ClassifierModel::NaiveBayes(model) => model.intents(),
            ClassifierModel::LogisticRegression(model) => model.intents(),
            ClassifierModel::Untrained => &[],
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ClassifierModel::NaiveBayes(model) => model.name(),
            ClassifierModel::LogisticRegression(model) => model.name(),
            ClassifierModel::Untrained => "untrained",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrained_predicts_nothing() {
        let model = ClassifierModel::Untrained;

        assert!(model.predict(&FeatureVector::zeros(4)).unwrap().is_empty());
        assert!(model.intents().is_empty());
        assert!(!model.is_trained());
    }

    #[test]
    fn test_train_dispatches_on_kind() {
        let features = vec![
            FeatureVector::from_counts(vec![1.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 1.0]),
        ];
        let labels = vec!["a".to_string(), "b".to_string()];

        let config = ClassifierConfig {
            kind: ClassifierKind::NaiveBayes,
            ..ClassifierConfig::default()
        };
        let nb = ClassifierModel::train(&config, &features, &labels).unwrap();
        assert_eq!(nb.name(), "naive_bayes");

        let lr = ClassifierModel::train(&ClassifierConfig::default(), &features, &labels).unwrap();
        assert_eq!(lr.name(), "logistic_regression");
        assert_eq!(lr.intents(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_config_validation() {
        assert!(ClassifierConfig::default().validate().is_ok());

        let config = ClassifierConfig {
            smoothing: -1.0,
            ..ClassifierConfig::default()
        };
        assert!(config.validate().is_err());

        let config: ClassifierConfig =
            serde_json::from_str(r#"{"kind": "naive_bayes", "iterations": 50}"#).unwrap();
        assert_eq!(config.kind, ClassifierKind::NaiveBayes);
        assert_eq!(config.iterations, 50);
        assert_eq!(config.smoothing, 0.25);
    }

    #[test]
    fn test_model_bincode_round_trip_is_exact() {
        let features = vec![
            FeatureVector::from_counts(vec![1.0, 2.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 1.0, 3.0]),
        ];
        let labels = vec!["a".to_string(), "b".to_string()];
        let model =
            ClassifierModel::train(&ClassifierConfig::default(), &features, &labels).unwrap();

        let bytes = bincode::serialize(&model).unwrap();
        let decoded: ClassifierModel = bincode::deserialize(&bytes).unwrap();

        let query = FeatureVector::from_counts(vec![1.0, 1.0, 1.0]);
        assert_eq!(decoded, model);
        assert_eq!(decoded.predict(&query).unwrap(), model.predict(&query).unwrap());
    }
}
