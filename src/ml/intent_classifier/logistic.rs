//! Multinomial logistic regression trained by full-batch gradient descent.
//!
//! Weights start at zero and every iteration visits the whole training set
//! in input order, so training involves no randomness and is reproducible.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainingFailure};
use crate::ml::intent_classifier::classifier::Classifier;
use crate::ml::intent_classifier::naive_bayes::{check_dimension, index_labels};
use crate::ml::intent_classifier::types::{IntentDistribution, softmax};
use crate::ml::intent_classifier::vectorizer::FeatureVector;

/// Gradient descent hyper-parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogisticParams {
    pub learning_rate: f64,
    pub iterations: usize,
    pub l2_penalty: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        LogisticParams {
            learning_rate: 0.5,
            iterations: 300,
            l2_penalty: 0.001,
        }
    }
}

/// Trained softmax regression parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionModel {
    intents: Vec<String>,
    /// One row of `dimension` weights per intent.
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl LogisticRegressionModel {
    pub fn train(
        features: &[FeatureVector],
        labels: &[String],
        params: &LogisticParams,
    ) -> std::result::Result<Self, TrainingFailure> {
        if !params.learning_rate.is_finite() || params.learning_rate <= 0.0 {
            return Err(TrainingFailure::InvalidData(format!(
                "learning rate must be positive, got {}",
                params.learning_rate
            )));
        }
        if !params.l2_penalty.is_finite() || params.l2_penalty < 0.0 {
            return Err(TrainingFailure::InvalidData(format!(
                "l2 penalty must be non-negative, got {}",
                params.l2_penalty
            )));
        }
        let (intents, classes, dimension) = index_labels(features, labels)?;

        let classes_len = intents.len();
        let samples = features.len() as f64;
        let mut model = LogisticRegressionModel {
            intents,
            weights: vec![vec![0.0; dimension]; classes_len],
            biases: vec![0.0; classes_len],
        };

        for _ in 0..params.iterations {
            let mut weight_grad = vec![vec![0.0; dimension]; classes_len];
            let mut bias_grad = vec![0.0; classes_len];

            for (vector, &class) in features.iter().zip(&classes) {
                let probs = softmax(&model.logits(vector));
                for (k, prob) in probs.into_iter().enumerate() {
                    let error = prob - if k == class { 1.0 } else { 0.0 };
                    bias_grad[k] += error;
                    for (idx, count) in vector.nonzero() {
                        weight_grad[k][idx] += error * count;
                    }
                }
            }

            for k in 0..classes_len {
                model.biases[k] -= params.learning_rate * bias_grad[k] / samples;
                for (weight, grad) in model.weights[k].iter_mut().zip(&weight_grad[k]) {
                    let step = grad / samples + params.l2_penalty * *weight;
                    *weight -= params.learning_rate * step;
                }
            }
        }

        Ok(model)
    }

    fn logits(&self, features: &FeatureVector) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                bias + features
                    .nonzero()
                    .map(|(idx, count)| row[idx] * count)
                    .sum::<f64>()
            })
            .collect()
    }

    pub fn dimension(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }
}

impl Classifier for LogisticRegressionModel {
    fn predict(&self, features: &FeatureVector) -> Result<IntentDistribution> {
        check_dimension(features, self.dimension())?;
        Ok(IntentDistribution::from_scores(
            &self.intents,
            softmax(&self.logits(features)),
        ))
    }

    fn intents(&self) -> &[String] {
        &self.intents
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_set() -> (Vec<FeatureVector>, Vec<String>) {
        // vocabulary: [anxious, exam, sleep, night]
        let features = vec![
            FeatureVector::from_counts(vec![1.0, 1.0, 0.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 1.0, 0.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 0.0, 1.0, 1.0]),
        ];
        let labels = vec!["study".to_string(), "study".to_string(), "sleep".to_string()];
        (features, labels)
    }

    #[test]
    fn test_separates_training_data() {
        let (features, labels) = training_set();
        let model =
            LogisticRegressionModel::train(&features, &labels, &LogisticParams::default()).unwrap();

        for (vector, label) in features.iter().zip(&labels) {
            let dist = model.predict(vector).unwrap();
            assert_eq!(&dist.top().unwrap().intent, label);
            assert!(dist.top().unwrap().score > 0.5);
            assert!((dist.total() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let (features, labels) = training_set();
        let params = LogisticParams::default();

        let first = LogisticRegressionModel::train(&features, &labels, &params).unwrap();
        let second = LogisticRegressionModel::train(&features, &labels, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_iterations_is_uniform() {
        let (features, labels) = training_set();
        let params = LogisticParams {
            iterations: 0,
            ..LogisticParams::default()
        };
        let model = LogisticRegressionModel::train(&features, &labels, &params).unwrap();

        let dist = model.predict(&features[0]).unwrap();
        assert!((dist.score("study").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_params() {
        let (features, labels) = training_set();
        let params = LogisticParams {
            learning_rate: 0.0,
            ..LogisticParams::default()
        };

        assert!(matches!(
            LogisticRegressionModel::train(&features, &labels, &params),
            Err(TrainingFailure::InvalidData(_))
        ));
    }
}
