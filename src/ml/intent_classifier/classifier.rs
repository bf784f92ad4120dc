//! Intent classifier trait definition.

use crate::error::Result;
use crate::ml::intent_classifier::types::IntentDistribution;
use crate::ml::intent_classifier::vectorizer::FeatureVector;

/// Intent classifier trait.
///
/// Implementations score a feature vector against every known intent and
/// return the full distribution, not just the argmax, so callers can gate
/// on confidence.
pub trait Classifier: Send + Sync {
    /// Predict the distribution over intents for `features`.
    ///
    /// Fails only when `features` does not match the trained vocabulary size.
    fn predict(&self, features: &FeatureVector) -> Result<IntentDistribution>;

    /// Intent ids in the order the distribution reports them.
    fn intents(&self) -> &[String];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &'static str;
}
