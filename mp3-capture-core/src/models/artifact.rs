use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// MIME type of the emitted byte stream.
pub const MP3_MIME_TYPE: &str = "audio/mp3";

/// Result of a completed capture session: one contiguous MP3 byte stream
/// plus metadata.
///
/// The same bytes back both consumer handles — `as_bytes()` for playback and
/// `save_to()` for download to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingArtifact {
    bytes: Vec<u8>,
    pub metadata: RecordingMetadata,
}

/// Metadata describing a finished recording.
///
/// Serializable for JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub bitrate_kbps: u32,
    pub mime_type: String,
    pub checksum: String,
    pub created_at: String,
}

impl RecordingArtifact {
    pub fn new(bytes: Vec<u8>, duration_secs: f64, sample_rate: u32, bitrate_kbps: u32) -> Self {
        let checksum = sha256_hex(&bytes);
        let metadata = RecordingMetadata {
            id: uuid::Uuid::new_v4().to_string(),
            duration_secs,
            sample_rate,
            bitrate_kbps,
            mime_type: MP3_MIME_TYPE.to_string(),
            checksum,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        Self { bytes, metadata }
    }

    /// The playable MP3 byte stream.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact to disk (the "download" handle).
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}

impl RecordingMetadata {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// SHA-256 hex digest of the artifact bytes.
fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn checksum_is_stable_for_same_bytes() {
        let a = RecordingArtifact::new(vec![1, 2, 3], 0.5, 44100, 128);
        let b = RecordingArtifact::new(vec![1, 2, 3], 0.5, 44100, 128);
        assert_eq!(a.metadata.checksum, b.metadata.checksum);
        assert_eq!(a.metadata.checksum.len(), 64);
    }

    #[test]
    fn ids_are_unique() {
        let a = RecordingArtifact::new(vec![], 0.0, 44100, 128);
        let b = RecordingArtifact::new(vec![], 0.0, 44100, 128);
        assert_ne!(a.metadata.id, b.metadata.id);
    }

    #[test]
    fn handles_share_the_same_bytes() {
        let artifact = RecordingArtifact::new(vec![0xFF, 0xFB, 0x90], 0.1, 48000, 128);
        assert_eq!(artifact.as_bytes(), &[0xFF, 0xFB, 0x90]);
        assert_eq!(artifact.len(), 3);

        let path = std::env::temp_dir().join("mp3_capture_artifact_test.mp3");
        artifact.save_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), artifact.as_bytes());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn metadata_round_trips_through_json() {
        let artifact = RecordingArtifact::new(vec![9; 16], 2.25, 44100, 192);
        let json = artifact.metadata.to_json().unwrap();
        let parsed: RecordingMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, artifact.metadata);
        assert_eq!(parsed.mime_type, MP3_MIME_TYPE);
        assert_relative_eq!(parsed.duration_secs, 2.25);
    }
}
