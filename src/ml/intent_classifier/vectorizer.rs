//! Count vectorizer turning token sequences into fixed-shape feature vectors.

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::corpus::TrainingDocument;
use crate::error::Result;
use crate::ml::intent_classifier::vocabulary::{Vocabulary, build_vocabulary};

/// Raw per-token counts, one entry per vocabulary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    counts: Vec<f64>,
}

impl FeatureVector {
    /// A vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        FeatureVector {
            counts: vec![0.0; len],
        }
    }

    pub fn from_counts(counts: Vec<f64>) -> Self {
        FeatureVector { counts }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// True when no in-vocabulary token was seen.
    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&count| count == 0.0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.counts
    }

    /// Iterate `(index, count)` over non-zero entries.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count != 0.0)
            .map(|(idx, count)| (idx, *count))
    }
}

/// Count in-vocabulary tokens. Out-of-vocabulary tokens contribute nothing.
pub fn vectorize<S: AsRef<str>>(tokens: &[S], vocabulary: &Vocabulary) -> FeatureVector {
    let mut features = FeatureVector::zeros(vocabulary.len());
    for token in tokens {
        if let Some(idx) = vocabulary.get(token.as_ref()) {
            features.counts[idx] += 1.0;
        }
    }
    features
}

/// Bundles a [`Normalizer`] with the [`Vocabulary`] fitted on training text,
/// so training and inference share one feature mapping.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    normalizer: Normalizer,
    vocabulary: Vocabulary,
}

impl CountVectorizer {
    /// Wrap an existing vocabulary, e.g. one restored from an artifact.
    pub fn new(normalizer: Normalizer, vocabulary: Vocabulary) -> Self {
        CountVectorizer {
            normalizer,
            vocabulary,
        }
    }

    /// Fit the vocabulary on `documents` and return the vectorizer together
    /// with each document's feature vector, in input order.
    pub fn fit(
        normalizer: Normalizer,
        documents: &[TrainingDocument],
    ) -> Result<(Self, Vec<FeatureVector>)> {
        let tokenized = documents
            .iter()
            .map(|doc| normalizer.normalize(&doc.utterance))
            .collect::<Result<Vec<_>>>()?;

        let vocabulary = build_vocabulary(&tokenized);
        let features = tokenized
            .iter()
            .map(|tokens| vectorize(tokens, &vocabulary))
            .collect();

        Ok((CountVectorizer::new(normalizer, vocabulary), features))
    }

    /// Normalize and vectorize `text`.
    pub fn transform(&self, text: &str) -> Result<FeatureVector> {
        let tokens = self.normalizer.normalize(text)?;
        Ok(vectorize(&tokens, &self.vocabulary))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::AnalysisConfig;

    fn normalizer() -> Normalizer {
        Normalizer::new(&AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_vectorize_counts_and_ignores_oov() {
        let vocabulary = build_vocabulary(vec![vec!["i", "cannot", "sleep"]]);
        let features = vectorize(&["sleep", "sleep", "purple", "i"], &vocabulary);

        assert_eq!(features.as_slice(), &[1.0, 0.0, 2.0]);
        assert_eq!(features.total(), 3.0);
        assert_eq!(features.nonzero().collect::<Vec<_>>(), vec![(0, 1.0), (2, 2.0)]);
    }

    #[test]
    fn test_zero_vector_for_oov_and_empty() {
        let vocabulary = build_vocabulary(vec![vec!["sleep"]]);

        assert!(vectorize(&["elephant"], &vocabulary).is_zero());
        assert!(vectorize::<&str>(&[], &vocabulary).is_zero());
        assert_eq!(vectorize::<&str>(&[], &vocabulary).len(), 1);
    }

    #[test]
    fn test_fit_and_transform() {
        let documents = vec![
            TrainingDocument::new("I feel anxious about my studies", "study.anxiety"),
            TrainingDocument::new("I cannot sleep", "health.sleep"),
        ];
        let (vectorizer, features) = CountVectorizer::fit(normalizer(), &documents).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 8);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].total(), 6.0);
        assert_eq!(features[1].as_slice()[0], 1.0);

        let query = vectorizer.transform("Anxious about EXAMS?").unwrap();
        assert_eq!(query.total(), 2.0);
        assert!(vectorizer.transform("purple elephant shoes").unwrap().is_zero());
        assert!(vectorizer.transform("...").unwrap().is_zero());
    }
}
