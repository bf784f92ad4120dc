//! Text analysis module for Solace.
//!
//! This module turns raw user messages into canonical token sequences. It is
//! built from three kinds of parts that compose into a pipeline:
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```
//!
//! [`Normalizer`] is the configured entry point used by training and
//! inference alike, so identical text always yields identical tokens.

pub mod analyzer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use normalizer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
