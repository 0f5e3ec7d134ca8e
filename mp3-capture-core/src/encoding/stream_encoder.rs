use super::codec::{EncoderSettings, Mp3Codec};
use crate::models::error::CaptureError;

/// Drives an `Mp3Codec` across incremental encode calls plus one final flush.
///
/// Lifecycle: `open` exactly once, any number of `encode_block` calls, then
/// `finish` at most once. Emitted chunks are retained in call order, flush
/// chunk last, so `into_stream()` yields a complete, independently decodable
/// MP3 byte stream.
pub struct StreamingEncoder<C: Mp3Codec> {
    codec: Option<C>,
    stream: Vec<u8>,
    opened: bool,
    finished: bool,
}

impl<C: Mp3Codec> StreamingEncoder<C> {
    pub fn new() -> Self {
        Self {
            codec: None,
            stream: Vec::new(),
            opened: false,
            finished: false,
        }
    }

    /// Initialize the codec. Must be called exactly once, before any encode.
    ///
    /// `sample_rate` must be the capture device's actual rate; a mismatch
    /// produces pitch-distorted output the encoder cannot detect.
    pub fn open(&mut self, sample_rate: u32, bitrate_kbps: u32) -> Result<(), CaptureError> {
        if self.opened {
            return Err(CaptureError::InvalidConfiguration(
                "encoder is already open".into(),
            ));
        }
        if sample_rate == 0 {
            return Err(CaptureError::InvalidConfiguration(
                "sample rate must be positive".into(),
            ));
        }

        let settings = EncoderSettings {
            channels: 1,
            sample_rate,
            bitrate_kbps,
        };
        self.codec = Some(C::open(&settings)?);
        self.opened = true;
        Ok(())
    }

    /// Feed one quantized block; returns the bytes emitted by this call
    /// (possibly empty while the codec accumulates a frame).
    ///
    /// Codec framing state persists across calls and is never reset.
    pub fn encode_block(&mut self, samples: &[i16]) -> Result<Vec<u8>, CaptureError> {
        let codec = self.codec.as_mut().ok_or(CaptureError::NotInitialized)?;
        let chunk = codec.encode(samples)?;
        self.stream.extend_from_slice(&chunk);
        Ok(chunk)
    }

    /// Flush buffered codec state into final bytes. At most once, after all
    /// `encode_block` calls; returns empty if nothing remained.
    pub fn finish(&mut self) -> Result<Vec<u8>, CaptureError> {
        let mut codec = self.codec.take().ok_or(CaptureError::NotInitialized)?;
        self.finished = true;
        let tail = codec.flush()?;
        self.stream.extend_from_slice(&tail);
        Ok(tail)
    }

    /// Whether `finish` has run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes emitted so far, in call order.
    pub fn stream_len(&self) -> usize {
        self.stream.len()
    }

    /// The concatenation of every emitted chunk in call order: the complete
    /// MP3 artifact once `finish` has run.
    pub fn into_stream(self) -> Vec<u8> {
        self.stream
    }
}

impl<C: Mp3Codec> Default for StreamingEncoder<C> {
    fn default() -> Self {
        Self::new()
    }
}
