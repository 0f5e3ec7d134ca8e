use crate::models::error::CaptureError;

/// Parameters handed to the codec at open time.
///
/// The sample rate is always the rate the capture device actually delivers,
/// queried at runtime — never a hardcoded default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSettings {
    /// Number of input channels. This core is mono-only, so always 1.
    pub channels: u8,
    /// Input sample rate in Hz.
    pub sample_rate: u32,
    /// Constant output bitrate in kbit/s.
    pub bitrate_kbps: u32,
}

/// Interface to the MP3 bitstream codec.
///
/// The codec is a black box: psychoacoustics and Huffman coding live behind
/// this trait. Frame-alignment state is carried internally between `encode`
/// calls, so chained calls produce one continuous stream, terminated by
/// exactly one `flush`. `StreamingEncoder` enforces that call discipline;
/// tests substitute scripted implementations.
pub trait Mp3Codec {
    /// Create a codec instance for the given settings.
    fn open(settings: &EncoderSettings) -> Result<Self, CaptureError>
    where
        Self: Sized;

    /// Feed quantized samples; returns zero or more emitted stream bytes.
    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>, CaptureError>;

    /// Flush any buffered codec state into final stream bytes.
    fn flush(&mut self) -> Result<Vec<u8>, CaptureError>;
}
