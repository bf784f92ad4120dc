//! Training corpus: labelled utterances plus the responses for each intent.
//!
//! A corpus is fixed at configuration time. It can be the built-in
//! student-wellbeing corpus or a JSON file of the form:
//!
//! ```json
//! {
//!   "intents": [
//!     {
//!       "intent": "health.sleep",
//!       "utterances": ["I cannot sleep", "I have insomnia"],
//!       "responses": ["Good sleep is crucial for mental health..."]
//!     }
//!   ]
//! }
//! ```

mod builtin;

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolaceError, TrainingFailure};

/// A single labelled training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDocument {
    /// Example user message.
    pub utterance: String,
    /// Intent id the utterance belongs to.
    pub intent: String,
}

impl TrainingDocument {
    pub fn new<U: Into<String>, I: Into<String>>(utterance: U, intent: I) -> Self {
        TrainingDocument {
            utterance: utterance.into(),
            intent: intent.into(),
        }
    }
}

/// Summary produced by [`TrainingCorpus::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of training documents.
    pub documents: usize,
    /// Number of distinct intents with at least one utterance.
    pub intents: usize,
    /// Number of response templates across all intents.
    pub responses: usize,
    /// Intents that can be predicted but have nothing to say.
    pub intents_without_responses: Vec<String>,
    /// Intents with responses that can never be predicted.
    pub intents_without_utterances: Vec<String>,
}

/// Labelled utterances and the intent → response table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCorpus {
    documents: Vec<TrainingDocument>,
    responses: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CorpusFile {
    intents: Vec<IntentEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct IntentEntry {
    intent: String,
    #[serde(default)]
    utterances: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

impl TrainingCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in student-wellbeing corpus.
    pub fn builtin() -> Self {
        builtin::corpus()
    }

    /// Parse a corpus from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(json)?;
        let mut corpus = TrainingCorpus::new();
        for entry in file.intents {
            for utterance in entry.utterances {
                corpus.add_document(utterance, entry.intent.clone());
            }
            for response in entry.responses {
                corpus.add_response(entry.intent.clone(), response);
            }
        }
        Ok(corpus)
    }

    /// Load a corpus from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SolaceError::config(format!("cannot read corpus {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    /// Serialize to the JSON file format, grouping by intent in first-seen order.
    pub fn to_json_string(&self) -> Result<String> {
        let mut order: Vec<String> = self.intents();
        for intent in self.responses.keys() {
            if !order.contains(intent) {
                order.push(intent.clone());
            }
        }

        let intents = order
            .into_iter()
            .map(|intent| IntentEntry {
                utterances: self
                    .documents
                    .iter()
                    .filter(|doc| doc.intent == intent)
                    .map(|doc| doc.utterance.clone())
                    .collect(),
                responses: self.responses.get(&intent).cloned().unwrap_or_default(),
                intent,
            })
            .collect();

        Ok(serde_json::to_string_pretty(&CorpusFile { intents })?)
    }

    /// Add a training utterance for `intent`.
    pub fn add_document<U: Into<String>, I: Into<String>>(&mut self, utterance: U, intent: I) {
        self.documents.push(TrainingDocument::new(utterance, intent));
    }

    /// Add a response template for `intent`.
    pub fn add_response<I: Into<String>, R: Into<String>>(&mut self, intent: I, response: R) {
        self.responses
            .entry(intent.into())
            .or_default()
            .push(response.into());
    }

    pub fn documents(&self) -> &[TrainingDocument] {
        &self.documents
    }

    pub fn responses(&self) -> &BTreeMap<String, Vec<String>> {
        &self.responses
    }

    /// Response templates for `intent`, empty when it has none.
    pub fn responses_for(&self, intent: &str) -> &[String] {
        self.responses
            .get(intent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct intents with utterances, in first-seen order.
    pub fn intents(&self) -> Vec<String> {
        let mut intents: Vec<String> = Vec::new();
        for doc in &self.documents {
            if !intents.contains(&doc.intent) {
                intents.push(doc.intent.clone());
            }
        }
        intents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Check that the corpus can train a classifier.
    ///
    /// Intents missing either utterances or responses are not errors; they
    /// are listed in the stats and logged.
    pub fn validate(&self) -> std::result::Result<CorpusStats, TrainingFailure> {
        if self.documents.is_empty() {
            return Err(TrainingFailure::EmptyCorpus);
        }

        let blank_document = self.documents.iter().any(|doc| doc.intent.trim().is_empty());
        let blank_response = self.responses.keys().any(|intent| intent.trim().is_empty());
        if blank_document || blank_response {
            return Err(TrainingFailure::BlankIntent);
        }

        let intents = self.intents();
        if intents.len() < 2 {
            return Err(TrainingFailure::TooFewIntents {
                found: intents.len(),
            });
        }

        let intents_without_responses: Vec<String> = intents
            .iter()
            .filter(|intent| {
                self.responses_for(intent)
                    .iter()
                    .all(|text| text.trim().is_empty())
            })
            .cloned()
            .collect();
        let intents_without_utterances: Vec<String> = self
            .responses
            .keys()
            .filter(|intent| !intents.contains(intent))
            .cloned()
            .collect();

        for intent in &intents_without_responses {
            warn!("intent {intent} has no usable responses; it will fall back");
        }
        for intent in &intents_without_utterances {
            warn!("intent {intent} has responses but no utterances; it can never be predicted");
        }

        Ok(CorpusStats {
            documents: self.documents.len(),
            intents: intents.len(),
            responses: self.responses.values().map(Vec::len).sum(),
            intents_without_responses,
            intents_without_utterances,
        })
    }

    /// CRC32 of the canonical binary encoding.
    pub fn fingerprint(&self) -> Result<u32> {
        let bytes = bincode::serialize(self)?;
        Ok(crc32fast::hash(&bytes))
    }
}
