//! Multinomial Naive Bayes over token counts.
//!
//! For intent `k` with `N_k` training documents out of `N`, token count
//! totals `T_k` and vocabulary size `V`:
//!
//! ```text
//! log_prior[k]   = ln(N_k / N)
//! log_prob[k][j] = ln((count[k][j] + alpha) / (T_k + alpha * V))
//! jll[k]         = log_prior[k] + sum_j x[j] * log_prob[k][j]
//! ```
//!
//! The joint log-likelihoods are normalized with log-sum-exp. Additive
//! smoothing keeps every probability finite, so intents with a single
//! example and unseen tokens are handled.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError, TrainingFailure};
use crate::ml::intent_classifier::classifier::Classifier;
use crate::ml::intent_classifier::types::{IntentDistribution, softmax};
use crate::ml::intent_classifier::vectorizer::FeatureVector;

/// Trained multinomial Naive Bayes parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    intents: Vec<String>,
    log_priors: Vec<f64>,
    feature_log_probs: Vec<Vec<f64>>,
    smoothing: f64,
}

/// Map labels to class indexes in first-seen order and check the shapes.
pub(crate) fn index_labels(
    features: &[FeatureVector],
    labels: &[String],
) -> std::result::Result<(Vec<String>, Vec<usize>, usize), TrainingFailure> {
    if features.is_empty() {
        return Err(TrainingFailure::EmptyCorpus);
    }
    if features.len() != labels.len() {
        return Err(TrainingFailure::InvalidData(format!(
            "{} feature vectors but {} labels",
            features.len(),
            labels.len()
        )));
    }

    let dimension = features[0].len();
    if dimension == 0 {
        return Err(TrainingFailure::EmptyVocabulary);
    }
    if let Some(bad) = features.iter().find(|f| f.len() != dimension) {
        return Err(TrainingFailure::InvalidData(format!(
            "feature vector of length {} in a {dimension}-token vocabulary",
            bad.len()
        )));
    }

    let mut intents: Vec<String> = Vec::new();
    let mut classes = Vec::with_capacity(labels.len());
    for label in labels {
        if label.trim().is_empty() {
            return Err(TrainingFailure::BlankIntent);
        }
        let class = match intents.iter().position(|intent| intent == label) {
            Some(class) => class,
            None => {
                intents.push(label.clone());
                intents.len() - 1
            }
        };
        classes.push(class);
    }
    if intents.len() < 2 {
        return Err(TrainingFailure::TooFewIntents {
            found: intents.len(),
        });
    }

    Ok((intents, classes, dimension))
}

pub(crate) fn check_dimension(features: &FeatureVector, expected: usize) -> Result<()> {
    if features.len() != expected {
        return Err(SolaceError::invalid_argument(format!(
            "feature vector has {} entries, model expects {expected}",
            features.len()
        )));
    }
    Ok(())
}

impl NaiveBayesModel {
    /// Fit the model. `smoothing` must be positive.
    pub fn train(
        features: &[FeatureVector],
        labels: &[String],
        smoothing: f64,
    ) -> std::result::Result<Self, TrainingFailure> {
        if !smoothing.is_finite() || smoothing <= 0.0 {
            return Err(TrainingFailure::InvalidData(format!(
                "smoothing must be positive, got {smoothing}"
            )));
        }
        let (intents, classes, dimension) = index_labels(features, labels)?;

        let mut doc_counts = vec![0usize; intents.len()];
        let mut token_counts = vec![vec![0.0; dimension]; intents.len()];
        for (vector, &class) in features.iter().zip(&classes) {
            doc_counts[class] += 1;
            for (idx, count) in vector.nonzero() {
                token_counts[class][idx] += count;
            }
        }

        let total_docs = features.len() as f64;
        let log_priors = doc_counts
            .iter()
            .map(|&count| (count as f64 / total_docs).ln())
            .collect();

        let feature_log_probs = token_counts
            .into_iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum();
                let denominator = total + smoothing * dimension as f64;
                counts
                    .into_iter()
                    .map(|count| ((count + smoothing) / denominator).ln())
                    .collect()
            })
            .collect();

        Ok(NaiveBayesModel {
            intents,
            log_priors,
            feature_log_probs,
            smoothing,
        })
    }

    /// Joint log-likelihood per intent.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        check_dimension(features, self.dimension())?;

        Ok(self
            .log_priors
            .iter()
            .zip(&self.feature_log_probs)
            .map(|(prior, log_probs)| {
                prior
                    + features
                        .nonzero()
                        .map(|(idx, count)| count * log_probs[idx])
                        .sum::<f64>()
            })
            .collect())
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Vocabulary size the model was trained on.
    pub fn dimension(&self) -> usize {
        self.feature_log_probs.first().map_or(0, Vec::len)
    }
}

impl Classifier for NaiveBayesModel {
    fn predict(&self, features: &FeatureVector) -> Result<IntentDistribution> {
        let jll = self.joint_log_likelihood(features)?;
        Ok(IntentDistribution::from_scores(&self.intents, softmax(&jll)))
    }

    fn intents(&self) -> &[String] {
        &self.intents
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_train_and_predict() {
        // vocabulary: [anxious, exam, sleep, night]
        let features = vec![
            FeatureVector::from_counts(vec![1.0, 1.0, 0.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 0.0, 1.0, 1.0]),
        ];
        let model =
            NaiveBayesModel::train(&features, &labels(&["study", "sleep"]), 1.0).unwrap();

        let dist = model
            .predict(&FeatureVector::from_counts(vec![1.0, 0.0, 0.0, 0.0]))
            .unwrap();
        assert!((dist.total() - 1.0).abs() < 1e-12);
        // ln(2/6) - ln(1/6) = ln 2, so p = 2/3
        assert!((dist.score("study").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(dist.top().unwrap().intent, "study");
    }

    #[test]
    fn test_zero_vector_returns_priors() {
        let features = vec![
            FeatureVector::from_counts(vec![1.0, 0.0]),
            FeatureVector::from_counts(vec![1.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 1.0]),
        ];
        let model = NaiveBayesModel::train(&features, &labels(&["a", "a", "b"]), 0.5).unwrap();

        let dist = model.predict(&FeatureVector::zeros(2)).unwrap();
        assert!((dist.score("a").unwrap() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_training_failures() {
        let one = vec![FeatureVector::from_counts(vec![1.0])];

        assert_eq!(
            NaiveBayesModel::train(&[], &[], 1.0),
            Err(TrainingFailure::EmptyCorpus)
        );
        assert_eq!(
            NaiveBayesModel::train(&one, &labels(&["a"]), 1.0),
            Err(TrainingFailure::TooFewIntents { found: 1 })
        );
        assert!(matches!(
            NaiveBayesModel::train(&one, &labels(&["a", "b"]), 1.0),
            Err(TrainingFailure::InvalidData(_))
        ));
        assert!(matches!(
            NaiveBayesModel::train(&one, &labels(&["a"]), 0.0),
            Err(TrainingFailure::InvalidData(_))
        ));
        assert_eq!(
            NaiveBayesModel::train(
                &[FeatureVector::zeros(0), FeatureVector::zeros(0)],
                &labels(&["a", "b"]),
                1.0
            ),
            Err(TrainingFailure::EmptyVocabulary)
        );
    }

    #[test]
    fn test_predict_rejects_wrong_dimension() {
        let features = vec![
            FeatureVector::from_counts(vec![1.0, 0.0]),
            FeatureVector::from_counts(vec![0.0, 1.0]),
        ];
        let model = NaiveBayesModel::train(&features, &labels(&["a", "b"]), 1.0).unwrap();

        assert!(model.predict(&FeatureVector::zeros(3)).is_err());
        assert_eq!(model.dimension(), 2);
        assert_eq!(model.name(), "naive_bayes");
    }
}
