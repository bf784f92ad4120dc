//! # Solace
//!
//! Intent classification and response selection for supportive chat
//! assistants.
//!
//! ## Features
//!
//! - Deterministic text normalization (tokenize, lowercase, stem)
//! - Bag-of-words multinomial Naive Bayes and logistic regression classifiers
//! - Confidence-gated response selection with fallbacks
//! - Versioned, checksummed model artifacts with automatic retraining
//! - Safe concurrent use from many request threads

pub mod analysis;
pub mod cli;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod ml;
pub mod store;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
