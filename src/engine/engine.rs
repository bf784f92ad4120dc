//! The response engine: lazy model lifecycle plus confidence-gated answers.
//!
//! ```text
//! Uninitialized ──first request / initialize()──▶ Initializing ──▶ Ready
//!                                                   │  load ok
//!                                                   │  load failed → train → save
//!                                                   │  training failed → degraded
//! ```
//!
//! `Ready` is terminal. [`ResponseEngine::retrain`] builds a replacement
//! model off to the side and publishes it by swapping an `Arc`, so requests
//! in flight keep using the model they started with.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::corpus::TrainingCorpus;
use crate::engine::config::EngineConfig;
use crate::engine::response::{ClassifyResponse, ResponseSelector};
use crate::error::{LoadFailure, Result};
use crate::ml::intent_classifier::{
    Classifier, ClassifierModel, CountVectorizer, IntentDistribution, TrainingSettings,
    TrainingStats, Vocabulary, train_classifier,
};
use crate::store::{FileModelStore, ModelStore, PersistedModel};

/// Lifecycle state of a [`ResponseEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Ready,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Uninitialized => write!(f, "uninitialized"),
            EngineState::Initializing => write!(f, "initializing"),
            EngineState::Ready => write!(f, "ready"),
        }
    }
}

/// Where the active model came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    /// Decoded from the model store.
    Loaded,
    /// Trained from the corpus in this process.
    Trained,
    /// Training failed; every request falls back.
    Degraded,
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Loaded => write!(f, "loaded"),
            ModelSource::Trained => write!(f, "trained"),
            ModelSource::Degraded => write!(f, "degraded"),
        }
    }
}

/// Summary of the active model for administrative callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub source: ModelSource,
    pub classifier: String,
    pub intents: Vec<String>,
    pub vocabulary_size: usize,
    pub corpus_fingerprint: u32,
    pub stats: TrainingStats,
    pub trained_at: Option<DateTime<Utc>>,
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub classifier: String,
    pub documents: usize,
    pub intents: usize,
    pub vocabulary_size: usize,
    pub training_accuracy: f64,
    pub corpus_fingerprint: u32,
    /// Whether the artifact was written to the store.
    pub saved: bool,
    pub elapsed_ms: f64,
}

/// A published model. Immutable; replaced as a whole on retrain.
#[derive(Debug)]
struct ActiveModel {
    /// `None` for the degraded model.
    vectorizer: Option<CountVectorizer>,
    persisted: PersistedModel,
    source: ModelSource,
}

/// Routes messages to intents and answers them.
///
/// Create one per process and share it by reference or `Arc`; all methods
/// take `&self`.
pub struct ResponseEngine {
    config: EngineConfig,
    settings: TrainingSettings,
    corpus: TrainingCorpus,
    corpus_fingerprint: u32,
    store: Arc<dyn ModelStore>,
    selector: ResponseSelector,
    state: RwLock<EngineState>,
    init_lock: Mutex<()>,
    model: RwLock<Option<Arc<ActiveModel>>>,
}

impl ResponseEngine {
    /// Create an engine over an explicit corpus and store. Nothing is loaded
    /// or trained until the first request.
    pub fn new(
        config: EngineConfig,
        corpus: TrainingCorpus,
        store: Arc<dyn ModelStore>,
    ) -> Result<Self> {
        config.validate()?;
        let corpus_fingerprint = corpus.fingerprint()?;

        Ok(ResponseEngine {
            settings: config.training_settings(),
            selector: ResponseSelector::new(&config.selection),
            config,
            corpus,
            corpus_fingerprint,
            store,
            state: RwLock::new(EngineState::Uninitialized),
            init_lock: Mutex::new(()),
            model: RwLock::new(None),
        })
    }

    /// Create an engine from configuration alone: the corpus comes from
    /// `corpus_path` (or the built-in corpus) and the store is the file at
    /// `model_path`.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let corpus = match &config.corpus_path {
            Some(path) => TrainingCorpus::from_json_file(path)?,
            None => TrainingCorpus::builtin(),
        };
        let store = Arc::new(FileModelStore::new(&config.model_path));
        Self::new(config, corpus, store)
    }

    pub fn state(&self) -> EngineState {
        *self.state.read()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn corpus(&self) -> &TrainingCorpus {
        &self.corpus
    }

    /// Run initialization now instead of on the first request.
    pub fn initialize(&self) -> ModelSource {
        self.active_model().source
    }

    fn active_model(&self) -> Arc<ActiveModel> {
        if let Some(model) = self.model.read().as_ref() {
            return model.clone();
        }

        let _guard = self.init_lock.lock();
        if let Some(model) = self.model.read().as_ref() {
            return model.clone();
        }

        *self.state.write() = EngineState::Initializing;
        info!("initializing response engine from {}", self.store.location());
        let model = Arc::new(self.load_or_train());
        *self.model.write() = Some(model.clone());
        *self.state.write() = EngineState::Ready;
        info!(
            "response engine ready ({} model, {} intents)",
            model.source,
            model.persisted.classifier.intents().len()
        );
        model
    }

    fn load_or_train(&self) -> ActiveModel {
        match self.load() {
            Ok(model) => return model,
            Err(LoadFailure::Missing) => info!("no model at {}; training", self.store.location()),
            Err(failure) => warn!(
                "cannot use model at {}: {failure}; retraining",
                self.store.location()
            ),
        }

        match self.train() {
            Ok((model, _)) => {
                self.save(&model.persisted);
                model
            }
            Err(e) => {
                error!("training failed: {e}; serving fallback responses only");
                self.degraded()
            }
        }
    }

    fn load(&self) -> std::result::Result<ActiveModel, LoadFailure> {
        let persisted = self.store.load()?;
        persisted.ensure_current(self.corpus_fingerprint, &self.settings)?;

        let normalizer = Normalizer::new(&persisted.settings.analysis)
            .map_err(|e| LoadFailure::Corrupt(format!("cannot rebuild normalizer: {e}")))?;
        let vectorizer = CountVectorizer::new(normalizer, persisted.vocabulary.clone());
        info!(
            "loaded {} model trained at {}",
            persisted.classifier.name(),
            persisted.trained_at
        );

        Ok(ActiveModel {
            vectorizer: Some(vectorizer),
            persisted,
            source: ModelSource::Loaded,
        })
    }

    fn train(&self) -> Result<(ActiveModel, TrainingReport)> {
        let start = Instant::now();
        let trained = train_classifier(&self.corpus, &self.settings)?;

        let report = TrainingReport {
            classifier: trained.classifier.name().to_string(),
            documents: trained.stats.documents,
            intents: trained.stats.intents,
            vocabulary_size: trained.stats.vocabulary_size,
            training_accuracy: trained.stats.training_accuracy,
            corpus_fingerprint: self.corpus_fingerprint,
            saved: false,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        let persisted = PersistedModel {
            vocabulary: trained.vectorizer.vocabulary().clone(),
            classifier: trained.classifier,
            responses: self.corpus.responses().clone(),
            settings: self.settings.clone(),
            corpus_fingerprint: self.corpus_fingerprint,
            stats: trained.stats,
            trained_at: Utc::now(),
        };

        let model = ActiveModel {
            vectorizer: Some(trained.vectorizer),
            persisted,
            source: ModelSource::Trained,
        };
        Ok((model, report))
    }

    fn save(&self, persisted: &PersistedModel) -> bool {
        match self.store.save(persisted) {
            Ok(()) => {
                info!("saved model to {}", self.store.location());
                true
            }
            Err(e) => {
                warn!("cannot save model to {}: {e}", self.store.location());
                false
            }
        }
    }

    fn degraded(&self) -> ActiveModel {
        ActiveModel {
            vectorizer: None,
            persisted: PersistedModel {
                vocabulary: Vocabulary::new(),
                classifier: ClassifierModel::Untrained,
                responses: self.corpus.responses().clone(),
                settings: self.settings.clone(),
                corpus_fingerprint: self.corpus_fingerprint,
                stats: TrainingStats::default(),
                trained_at: Utc::now(),
            },
            source: ModelSource::Degraded,
        }
    }

    /// Train a fresh model, save it and publish it.
    ///
    /// On failure the current model stays in place and the error is returned.
    pub fn retrain(&self) -> Result<TrainingReport> {
        let _guard = self.init_lock.lock();
        info!("retraining from {} documents", self.corpus.len());

        let (model, mut report) = self.train()?;
        report.saved = self.save(&model.persisted);

        let previous = self.model.write().replace(Arc::new(model));
        *self.state.write() = EngineState::Ready;
        if let Some(previous) = previous {
            debug!("replaced {} model", previous.source);
        }
        Ok(report)
    }

    /// Classify `text` and pick a response. Never fails: any problem yields
    /// a fallback reply.
    pub fn classify(&self, text: &str) -> ClassifyResponse {
        let start = Instant::now();
        let model = self.active_model();
        let input = truncate_chars(text, self.config.max_input_chars);
        if input.len() < text.len() {
            debug!(
                "input truncated to {} characters",
                self.config.max_input_chars
            );
        }

        let (response_text, intent, confidence) = self.answer(&model, input);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "classified in {elapsed_ms:.3}ms: intent={} confidence={confidence:.4}",
            intent.as_deref().unwrap_or("none")
        );

        ClassifyResponse {
            response_text,
            intent,
            confidence,
            elapsed_ms,
        }
    }

    /// Answer text only.
    pub fn respond(&self, text: &str) -> String {
        self.classify(text).response_text
    }

    fn answer(&self, model: &ActiveModel, input: &str) -> (String, Option<String>, f64) {
        let Some(vectorizer) = &model.vectorizer else {
            return (self.fallback(), None, 0.0);
        };

        let features = match vectorizer.transform(input) {
            Ok(features) => features,
            Err(e) => {
                error!("cannot vectorize input: {e}");
                return (self.config.error_response.clone(), None, 0.0);
            }
        };
        if features.is_zero() {
            return (self.fallback(), None, 0.0);
        }

        let distribution = match model.persisted.classifier.predict(&features) {
            Ok(distribution) => distribution,
            Err(e) => {
                error!("prediction failed: {e}");
                return (self.config.error_response.clone(), None, 0.0);
            }
        };
        let Some(top) = distribution.top() else {
            return (self.fallback(), None, 0.0);
        };

        if top.score < self.config.confidence_threshold {
            return (self.fallback(), None, top.score);
        }

        let templates = model
            .persisted
            .responses
            .get(&top.intent)
            .map(Vec::as_slice)
            .unwrap_or_default();
        match self.selector.select(templates) {
            Some(text) => (text.to_string(), Some(top.intent.clone()), top.score),
            None => {
                warn!("intent {} has no usable responses; falling back", top.intent);
                (self.fallback(), None, top.score)
            }
        }
    }

    fn fallback(&self) -> String {
        self.selector
            .select(&self.config.fallback_responses)
            .unwrap_or(self.config.error_response.as_str())
            .to_string()
    }

    /// The full distribution for `text`; empty for blank or unknown input
    /// and for the degraded model.
    pub fn distribution(&self, text: &str) -> Result<IntentDistribution> {
        let model = self.active_model();
        let Some(vectorizer) = &model.vectorizer else {
            return Ok(IntentDistribution::empty());
        };
        let features = vectorizer.transform(truncate_chars(text, self.config.max_input_chars))?;
        if features.is_zero() {
            return Ok(IntentDistribution::empty());
        }
        model.persisted.classifier.predict(&features)
    }

    /// Describe the active model, initializing it if needed.
    pub fn model_info(&self) -> ModelInfo {
        let model = self.active_model();
        let persisted = &model.persisted;
        ModelInfo {
            source: model.source,
            classifier: persisted.classifier.name().to_string(),
            intents: persisted.classifier.intents().to_vec(),
            vocabulary_size: persisted.vocabulary.len(),
            corpus_fingerprint: persisted.corpus_fingerprint,
            stats: persisted.stats.clone(),
            trained_at: (model.source != ModelSource::Degraded).then_some(persisted.trained_at),
        }
    }
}

impl fmt::Debug for ResponseEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseEngine")
            .field("state", &self.state())
            .field("store", &self.store)
            .field("documents", &self.corpus.len())
            .finish()
    }
}

/// Prefix of `text` holding at most `max_chars` characters.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
