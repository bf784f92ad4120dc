//! Binary model artifact layout.
//!
//! ```text
//! +--------+-------------+----------------+-------------+-----------------+
//! | "SLCM" | version u32 | payload_len u64| crc32 u32   | payload (bincode)|
//! +--------+-------------+----------------+-------------+-----------------+
//! ```
//!
//! All integers are little-endian. The payload is the bincode encoding of
//! [`PersistedModel`], which stores every `f64` bit-for-bit.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LoadFailure, Result};
use crate::ml::intent_classifier::{ClassifierModel, TrainingSettings, TrainingStats, Vocabulary};

/// Magic bytes at the start of every artifact.
pub const MAGIC: &[u8; 4] = b"SLCM";

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 4 + 4 + 8 + 4;

/// Everything needed to answer requests without retraining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedModel {
    pub vocabulary: Vocabulary,
    pub classifier: ClassifierModel,
    /// Intent → response templates.
    pub responses: BTreeMap<String, Vec<String>>,
    pub settings: TrainingSettings,
    /// CRC32 of the corpus the model was trained from.
    pub corpus_fingerprint: u32,
    pub stats: TrainingStats,
    pub trained_at: DateTime<Utc>,
}

impl PersistedModel {
    /// Reject a model built from another corpus or with other settings.
    pub fn ensure_current(
        &self,
        corpus_fingerprint: u32,
        settings: &TrainingSettings,
    ) -> std::result::Result<(), LoadFailure> {
        if self.corpus_fingerprint != corpus_fingerprint {
            return Err(LoadFailure::Stale(format!(
                "corpus fingerprint {:08x} differs from {corpus_fingerprint:08x}",
                self.corpus_fingerprint
            )));
        }
        if &self.settings != settings {
            return Err(LoadFailure::Stale(
                "trained with different analysis or classifier settings".to_string(),
            ));
        }
        Ok(())
    }
}

/// Decoded fixed-size header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactHeader {
    pub version: u32,
    pub payload_len: u64,
    pub checksum: u32,
}

/// Encode `model` into artifact bytes.
pub fn encode_artifact(model: &PersistedModel) -> Result<Vec<u8>> {
    let payload = bincode::serialize(model)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    bytes.write_u64::<LittleEndian>(payload.len() as u64)?;
    bytes.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Parse and check the header. The version is not checked here.
pub fn read_header(bytes: &[u8]) -> std::result::Result<ArtifactHeader, LoadFailure> {
    if bytes.len() < MAGIC.len() || &bytes[..MAGIC.len()] != MAGIC {
        return Err(LoadFailure::Corrupt("bad magic".to_string()));
    }
    if bytes.len() < HEADER_LEN {
        return Err(LoadFailure::Corrupt(format!(
            "truncated header: {} of {HEADER_LEN} bytes",
            bytes.len()
        )));
    }

    let mut cursor = Cursor::new(&bytes[MAGIC.len()..HEADER_LEN]);
    let header = read_header_fields(&mut cursor)
        .map_err(|e| LoadFailure::Corrupt(format!("unreadable header: {e}")))?;
    Ok(header)
}

fn read_header_fields<R: Read>(reader: &mut R) -> std::io::Result<ArtifactHeader> {
    Ok(ArtifactHeader {
        version: reader.read_u32::<LittleEndian>()?,
        payload_len: reader.read_u64::<LittleEndian>()?,
        checksum: reader.read_u32::<LittleEndian>()?,
    })
}

/// Decode artifact bytes, verifying magic, version, length and checksum.
pub fn decode_artifact(bytes: &[u8]) -> std::result::Result<PersistedModel, LoadFailure> {
    let header = read_header(bytes)?;
    if header.version != FORMAT_VERSION {
        return Err(LoadFailure::VersionMismatch {
            expected: FORMAT_VERSION,
            found: header.version,
        });
    }

    let payload = &bytes[HEADER_LEN..];
    if payload.len() as u64 != header.payload_len {
        return Err(LoadFailure::Corrupt(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            header.payload_len
        )));
    }
    if crc32fast::hash(payload) != header.checksum {
        return Err(LoadFailure::Corrupt("checksum mismatch".to_string()));
    }

    bincode::deserialize(payload).map_err(|e| LoadFailure::Corrupt(format!("decode error: {e}")))
}
