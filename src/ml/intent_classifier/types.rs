//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// A single (intent, score) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Intent id.
    pub intent: String,
    /// Probability in `[0, 1]`.
    pub score: f64,
}

/// A probability distribution over the known intents.
///
/// Entries follow the classifier's intent order. A trained model always
/// produces scores summing to 1.0; the degraded model produces none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentDistribution {
    results: Vec<ClassificationResult>,
}

impl IntentDistribution {
    pub fn new(results: Vec<ClassificationResult>) -> Self {
        IntentDistribution { results }
    }

    /// An empty distribution: every intent is unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from intent ids and probabilities in matching order.
    pub fn from_scores(intents: &[String], scores: Vec<f64>) -> Self {
        let results = intents
            .iter()
            .zip(scores)
            .map(|(intent, score)| ClassificationResult {
                intent: intent.clone(),
                score,
            })
            .collect();
        IntentDistribution { results }
    }

    /// The highest scoring intent. Ties go to the intent listed first.
    pub fn top(&self) -> Option<&ClassificationResult> {
        self.results.iter().fold(None, |best, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        })
    }

    /// Score of `intent`, if it is part of the distribution.
    pub fn score(&self, intent: &str) -> Option<f64> {
        self.results
            .iter()
            .find(|result| result.intent == intent)
            .map(|result| result.score)
    }

    /// Results sorted by descending score.
    pub fn ranked(&self) -> Vec<ClassificationResult> {
        let mut ranked = self.results.clone();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    pub fn total(&self) -> f64 {
        self.results.iter().map(|result| result.score).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Convert log-space joint scores into probabilities (log-sum-exp softmax).
pub(crate) fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        let uniform = 1.0 / scores.len().max(1) as f64;
        return vec![uniform; scores.len()];
    }
    let exps: Vec<f64> = scores.iter().map(|score| (score - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|value| value / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intents() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[test]
    fn test_top_prefers_first_on_tie() {
        let dist = IntentDistribution::from_scores(&intents(), vec![0.4, 0.4, 0.2]);

        let top = dist.top().unwrap();
        assert_eq!(top.intent, "a");
        assert_eq!(top.score, 0.4);
    }

    #[test]
    fn test_empty_distribution() {
        let dist = IntentDistribution::empty();

        assert!(dist.top().is_none());
        assert!(dist.is_empty());
        assert_eq!(dist.total(), 0.0);
    }

    #[test]
    fn test_ranked_and_lookup() {
        let dist = IntentDistribution::from_scores(&intents(), vec![0.1, 0.7, 0.2]);

        let ranked = dist.ranked();
        assert_eq!(ranked[0].intent, "b");
        assert_eq!(ranked[2].intent, "a");
        assert_eq!(dist.score("c"), Some(0.2));
        assert_eq!(dist.score("zzz"), None);
    }

    #[test]
    fn test_softmax_is_stable() {
        let probs = softmax(&[-1000.0, -1001.0, -1002.0]);

        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(probs[0] > probs[1] && probs[1] > probs[2]);
    }
}
