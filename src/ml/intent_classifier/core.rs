//! Training pipeline: corpus → normalizer → vocabulary → vectors → classifier.

use std::time::Instant;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::{AnalysisConfig, Normalizer};
use crate::corpus::TrainingCorpus;
use crate::error::Result;
use crate::ml::intent_classifier::classifier::Classifier;
use crate::ml::intent_classifier::model::{ClassifierConfig, ClassifierModel};
use crate::ml::intent_classifier::vectorizer::{CountVectorizer, FeatureVector};

/// Everything that shapes a trained model besides the corpus itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSettings {
    pub analysis: AnalysisConfig,
    pub classifier: ClassifierConfig,
}

/// Figures recorded when a model is trained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub documents: usize,
    pub intents: usize,
    pub vocabulary_size: usize,
    /// Share of training utterances whose top prediction is their own label.
    pub training_accuracy: f64,
}

/// The output of [`train_classifier`].
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    pub vectorizer: CountVectorizer,
    pub classifier: ClassifierModel,
    pub stats: TrainingStats,
}

/// Train a classifier from `corpus`.
///
/// Fails with [`TrainingFailure`](crate::error::TrainingFailure) when the
/// corpus cannot produce a model.
pub fn train_classifier(
    corpus: &TrainingCorpus,
    settings: &TrainingSettings,
) -> Result<TrainedClassifier> {
    let start = Instant::now();
    let corpus_stats = corpus.validate()?;

    let normalizer = Normalizer::new(&settings.analysis)?;
    let (vectorizer, features) = CountVectorizer::fit(normalizer, corpus.documents())?;
    debug!(
        "vectorized {} documents over {} tokens",
        features.len(),
        vectorizer.vocabulary_size()
    );

    let labels: Vec<String> = corpus
        .documents()
        .iter()
        .map(|doc| doc.intent.clone())
        .collect();
    let classifier = ClassifierModel::train(&settings.classifier, &features, &labels)?;

    let stats = TrainingStats {
        documents: corpus_stats.documents,
        intents: corpus_stats.intents,
        vocabulary_size: vectorizer.vocabulary_size(),
        training_accuracy: training_accuracy(&classifier, &features, &labels)?,
    };

    info!(
        "trained {} on {} documents, {} intents, {} tokens in {:.1}ms (training accuracy {:.3})",
        classifier.name(),
        stats.documents,
        stats.intents,
        stats.vocabulary_size,
        start.elapsed().as_secs_f64() * 1000.0,
        stats.training_accuracy
    );

    Ok(TrainedClassifier {
        vectorizer,
        classifier,
        stats,
    })
}

fn training_accuracy(
    classifier: &ClassifierModel,
    features: &[FeatureVector],
    labels: &[String],
) -> Result<f64> {
    let mut correct = 0usize;
    for (vector, label) in features.iter().zip(labels) {
        let distribution = classifier.predict(vector)?;
        if distribution.top().is_some_and(|top| &top.intent == label) {
            correct += 1;
        }
    }
    Ok(correct as f64 / features.len().max(1) as f64)
}
