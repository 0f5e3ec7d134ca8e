use std::sync::Arc;

use crate::models::error::CaptureError;

/// Callback invoked when a mono audio block is available.
///
/// Samples are f32 in the nominal range [-1.0, 1.0], at the rate reported by
/// `CaptureProvider::sample_rate`.
pub type AudioBlockCallback = Arc<dyn Fn(&[f32]) + Send + Sync + 'static>;

/// Interface for platform-specific audio capture sources.
///
/// Implemented by `CpalMicSource` in the cpal backend crate; tests use
/// scripted providers that push blocks on demand.
pub trait CaptureProvider: Send {
    /// Whether this capture source is currently available.
    fn is_available(&self) -> bool;

    /// The native sample rate of the underlying device stream, in Hz.
    ///
    /// The encoder is opened with exactly this value; it is queried at
    /// runtime rather than configured to keep pitch correct.
    fn sample_rate(&self) -> u32;

    /// Start capturing audio, delivering mono blocks via `callback`.
    ///
    /// The callback fires on a dedicated audio thread — keep processing minimal.
    fn start(&mut self, callback: AudioBlockCallback) -> Result<(), CaptureError>;

    /// Stop capturing and release the device stream.
    fn stop(&mut self) -> Result<(), CaptureError>;
}
