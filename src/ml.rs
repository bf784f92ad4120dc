//! Machine learning for Solace.
//!
//! Currently a single capability: intent classification of user messages.

pub mod intent_classifier;

pub use intent_classifier::*;
