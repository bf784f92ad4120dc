//! Model persistence.
//!
//! A [`ModelStore`] moves artifact bytes in and out of some medium; the
//! provided [`load`](ModelStore::load) and [`save`](ModelStore::save)
//! methods handle the artifact format on top of that.
//!
//! - [`FileModelStore`] - a single file, replaced atomically on save
//! - [`MemoryModelStore`] - an in-process buffer

pub mod artifact;
pub mod file;
pub mod memory;

pub use artifact::{
    ArtifactHeader, FORMAT_VERSION, HEADER_LEN, MAGIC, PersistedModel, decode_artifact,
    encode_artifact, read_header,
};
pub use file::FileModelStore;
pub use memory::MemoryModelStore;

use crate::error::{LoadFailure, Result};

/// A backend that can persist one model artifact.
pub trait ModelStore: Send + Sync + std::fmt::Debug {
    /// Read the raw artifact bytes.
    fn read_bytes(&self) -> std::result::Result<Vec<u8>, LoadFailure>;

    /// Replace the stored artifact with `bytes`.
    fn write_bytes(&self, bytes: &[u8]) -> Result<()>;

    /// Human readable location, used in logs.
    fn location(&self) -> String;

    /// Load and decode the stored model.
    fn load(&self) -> std::result::Result<PersistedModel, LoadFailure> {
        decode_artifact(&self.read_bytes()?)
    }

    /// Encode and store `model`.
    fn save(&self, model: &PersistedModel) -> Result<()> {
        let bytes = encode_artifact(model)?;
        self.write_bytes(&bytes)
    }
}
