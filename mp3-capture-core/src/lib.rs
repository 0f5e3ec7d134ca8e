//! # mp3-capture-core
//!
//! Platform-agnostic microphone-to-MP3 capture core library.
//!
//! Accumulates streaming f32 PCM blocks for the length of a session, then
//! quantizes and encodes them into a single in-memory MP3 artifact. Platform
//! backends (e.g. the cpal crate in this workspace) implement the
//! `CaptureProvider` trait and plug into the generic `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! mp3-capture-core (this crate)
//! ├── traits/       ← CaptureProvider, SessionDelegate
//! ├── models/       ← CaptureError, CaptureState, CaptureConfig, RecordingArtifact
//! ├── processing/   ← SampleBuffer, PCM quantization, mono downmix
//! ├── encoding/     ← Mp3Codec seam, LameCodec, StreamingEncoder
//! └── session/      ← CaptureSession (generic orchestrator)
//! ```
//!
//! ## Data flow
//!
//! ```text
//! [CaptureProvider] → callback → [SampleBuffer]
//!                                      ↓ stop()
//!                     drain → quantize → [StreamingEncoder] → RecordingArtifact
//! ```

pub mod encoding;
pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use encoding::codec::{EncoderSettings, Mp3Codec};
pub use encoding::lame::LameCodec;
pub use encoding::stream_encoder::StreamingEncoder;
pub use models::artifact::{RecordingArtifact, RecordingMetadata, MP3_MIME_TYPE};
pub use models::config::CaptureConfig;
pub use models::error::CaptureError;
pub use models::state::CaptureState;
pub use processing::sample_buffer::{AudioBlock, SampleBuffer};
pub use session::capture::CaptureSession;
pub use traits::capture_provider::{AudioBlockCallback, CaptureProvider};
pub use traits::session_delegate::SessionDelegate;
