//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by a tokenizer (or a previous
//! filter) and return a new stream.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Marks stop words as stopped
//! - [`stem::StemFilter`] - Reduces words to their stem form
//! - [`remove_empty::RemoveEmptyFilter`] - Drops empty and stopped tokens
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer → Remove Empty
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// # Examples
///
/// ```
/// use solace::analysis::token::{Token, TokenStream};
/// use solace::analysis::token_filter::Filter;
/// use solace::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod remove_empty;
pub mod stem;
pub mod stop;

pub use lowercase::LowercaseFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use stem::{IdentityStemmer, LightStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
