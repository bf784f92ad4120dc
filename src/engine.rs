//! Response engine: the entry point used by callers.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use solace::corpus::TrainingCorpus;
//! use solace::engine::{EngineConfig, ResponseEngine};
//! use solace::store::MemoryModelStore;
//!
//! # fn main() -> solace::error::Result<()> {
//! let engine = ResponseEngine::new(
//!     EngineConfig::default(),
//!     TrainingCorpus::builtin(),
//!     Arc::new(MemoryModelStore::new()),
//! )?;
//!
//! let response = engine.classify("I can't sleep at night");
//! assert_eq!(response.intent.as_deref(), Some("health.sleep"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod response;

pub use config::{DEFAULT_ERROR_RESPONSE, DEFAULT_FALLBACK_RESPONSES, EngineConfig};
pub use engine::{EngineState, ModelInfo, ModelSource, ResponseEngine, TrainingReport};
pub use response::{ClassifyResponse, ResponseSelector, SelectionStrategy};
