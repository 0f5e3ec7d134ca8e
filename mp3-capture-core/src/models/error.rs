use thiserror::Error;

/// Errors that can occur during capture and encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The capture source could not be acquired; the session never starts.
    #[error("device access denied: {0}")]
    DeviceAccessDenied(String),

    /// Bad encoder parameters (sample rate, bitrate). Fatal for the session.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Encode or flush was called before the encoder was opened, or after it
    /// was finalized. Programming error.
    #[error("encoder not initialized")]
    NotInitialized,

    /// `start()` called while a session is already recording or finalizing.
    #[error("session is already recording")]
    AlreadyRecording,

    /// `stop()` called outside the recording state.
    #[error("session is not recording")]
    NotRecording,

    /// The codec rejected input or failed internally.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),
}
