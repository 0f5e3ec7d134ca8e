//! # mp3-capture-cpal
//!
//! Cross-platform microphone backend for mp3-capture-core, built on cpal.
//!
//! Provides `CpalMicSource`, a `CaptureProvider` that opens the default
//! input device and delivers mono f32 blocks on a dedicated capture thread.
//!
//! ## Usage
//! ```ignore
//! use mp3_capture_core::{CaptureConfig, CaptureSession, LameCodec};
//! use mp3_capture_cpal::CpalMicSource;
//!
//! let mic = CpalMicSource::default_device()?;
//! let mut session: CaptureSession<_, LameCodec> =
//!     CaptureSession::new(mic, CaptureConfig::new())?;
//! session.start()?;
//! // ... later ...
//! let artifact = session.stop()?;
//! ```

mod mic_source;

pub use mic_source::CpalMicSource;
