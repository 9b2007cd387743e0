use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::RecordingWarning;

/// Final video handed to the review collaborator when a session finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingArtifact {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub size_bytes: u64,
    pub elapsed_secs: u64,
    /// Finished because the capture source went away, not by user request.
    pub partial: bool,
    /// Set when the artifact is delivered with a data-quality warning.
    pub warning: Option<RecordingWarning>,
    pub metadata: RecordingMetadata,
}

/// Metadata describing a finished recording.
///
/// Serializable for JSON hand-off to the review UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingMetadata {
    pub id: String,
    pub session_id: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub elapsed_secs: u64,
    pub chunk_count: usize,
    pub checksum: String,
    pub partial: bool,
    pub created_at: String,
}

impl RecordingArtifact {
    /// Concatenate encoded chunks, in order, into a single artifact.
    ///
    /// A zero-byte result is not an error; it carries
    /// [`RecordingWarning::EmptyArtifact`].
    pub fn assemble(
        session_id: &str,
        chunks: &[Vec<u8>],
        mime_type: &str,
        elapsed_secs: u64,
        partial: bool,
    ) -> Self {
        let data = chunks.concat();
        let size_bytes = data.len() as u64;
        let checksum = sha256_hex(&data);
        let warning = (size_bytes == 0).then_some(RecordingWarning::EmptyArtifact);

        let metadata = RecordingMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
            elapsed_secs,
            chunk_count: chunks.len(),
            checksum,
            partial,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        Self {
            data,
            mime_type: mime_type.to_string(),
            size_bytes,
            elapsed_secs,
            partial,
            warning,
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }

    pub fn checksum(&self) -> &str {
        &self.metadata.checksum
    }
}

/// SHA-256 hex digest.
fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
