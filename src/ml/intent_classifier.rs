//! Trainable intent classification over token counts.
//!
//! # Architecture
//!
//! - [`Vocabulary`]: token → index mapping fixed after training
//! - [`CountVectorizer`]: normalizes text and counts in-vocabulary tokens
//! - [`Classifier`] trait: common interface, returns a full [`IntentDistribution`]
//! - [`LogisticRegressionModel`]: softmax regression (default)
//! - [`NaiveBayesModel`]: multinomial Naive Bayes alternative
//! - [`ClassifierModel`]: persistable enum over the above plus the degraded model
//!
//! # Example
//!
//! ```
//! use solace::corpus::TrainingCorpus;
//! use solace::ml::intent_classifier::{self, Classifier, TrainingSettings};
//!
//! # fn main() -> solace::error::Result<()> {
//! let mut corpus = TrainingCorpus::new();
//! corpus.add_document("I feel anxious about my studies", "study.anxiety");
//! corpus.add_document("I cannot sleep", "health.sleep");
//!
//! let trained = intent_classifier::train_classifier(&corpus, &TrainingSettings::default())?;
//! let features = trained.vectorizer.transform("I am anxious about exams")?;
//! let distribution = trained.classifier.predict(&features)?;
//!
//! assert_eq!(distribution.top().unwrap().intent, "study.anxiety");
//! # Ok(())
//! # }
//! ```

mod classifier;
mod core;
mod logistic;
mod model;
mod naive_bayes;
mod types;
mod vectorizer;
mod vocabulary;

// Public exports
pub use classifier::Classifier;
pub use self::core::{TrainedClassifier, TrainingSettings, TrainingStats, train_classifier};
pub use logistic::{LogisticParams, LogisticRegressionModel};
pub use model::{ClassifierConfig, ClassifierKind, ClassifierModel};
pub use naive_bayes::NaiveBayesModel;
pub use types::{ClassificationResult, IntentDistribution};
pub use vectorizer::{CountVectorizer, FeatureVector, vectorize};
pub use vocabulary::{Vocabulary, build_vocabulary};
