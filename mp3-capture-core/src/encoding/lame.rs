use mp3lame_encoder::{Builder, Encoder, FlushNoGap, MonoPcm, Quality};

use super::codec::{EncoderSettings, Mp3Codec};
use crate::models::error::CaptureError;

/// LAME-backed MP3 codec (via `mp3lame-encoder`).
///
/// CBR mono output. LAME keeps frame-alignment state between `encode` calls
/// inside its own context, so incremental feeding produces one continuous
/// stream.
pub struct LameCodec {
    encoder: Encoder,
}

impl Mp3Codec for LameCodec {
    fn open(settings: &EncoderSettings) -> Result<Self, CaptureError> {
        let mut builder = Builder::new()
            .ok_or_else(|| CaptureError::EncodingFailed("failed to allocate LAME context".into()))?;

        builder
            .set_num_channels(settings.channels)
            .map_err(|e| CaptureError::InvalidConfiguration(format!("channel count: {}", e)))?;
        builder
            .set_sample_rate(settings.sample_rate)
            .map_err(|e| CaptureError::InvalidConfiguration(format!("sample rate: {}", e)))?;
        builder
            .set_brate(bitrate_setting(settings.bitrate_kbps)?)
            .map_err(|e| CaptureError::InvalidConfiguration(format!("bitrate: {}", e)))?;
        builder
            .set_quality(Quality::Best)
            .map_err(|e| CaptureError::InvalidConfiguration(format!("quality: {}", e)))?;

        let encoder = builder
            .build()
            .map_err(|e| CaptureError::InvalidConfiguration(format!("LAME init: {}", e)))?;

        Ok(Self { encoder })
    }

    fn encode(&mut self, samples: &[i16]) -> Result<Vec<u8>, CaptureError> {
        let mut out = Vec::new();
        out.reserve(mp3lame_encoder::max_required_buffer_size(samples.len()));

        let written = self
            .encoder
            .encode(MonoPcm(samples), out.spare_capacity_mut())
            .map_err(|e| CaptureError::EncodingFailed(format!("{}", e)))?;
        // SAFETY: `encode` initialized exactly `written` bytes of the spare capacity.
        unsafe { out.set_len(written) };

        Ok(out)
    }

    fn flush(&mut self) -> Result<Vec<u8>, CaptureError> {
        let mut out = Vec::new();
        out.reserve(mp3lame_encoder::max_required_buffer_size(0));

        let written = self
            .encoder
            .flush::<FlushNoGap>(out.spare_capacity_mut())
            .map_err(|e| CaptureError::EncodingFailed(format!("{}", e)))?;
        // SAFETY: `flush` initialized exactly `written` bytes of the spare capacity.
        unsafe { out.set_len(written) };

        Ok(out)
    }
}

/// Map a kbit/s value onto LAME's supported CBR set.
fn bitrate_setting(kbps: u32) -> Result<mp3lame_encoder::Bitrate, CaptureError> {
    use mp3lame_encoder::Bitrate;

    match kbps {
        8 => Ok(Bitrate::Kbps8),
        16 => Ok(Bitrate::Kbps16),
        24 => Ok(Bitrate::Kbps24),
        32 => Ok(Bitrate::Kbps32),
        40 => Ok(Bitrate::Kbps40),
        48 => Ok(Bitrate::Kbps48),
        64 => Ok(Bitrate::Kbps64),
        80 => Ok(Bitrate::Kbps80),
        96 => Ok(Bitrate::Kbps96),
        112 => Ok(Bitrate::Kbps112),
        128 => Ok(Bitrate::Kbps128),
        160 => Ok(Bitrate::Kbps160),
        192 => Ok(Bitrate::Kbps192),
        224 => Ok(Bitrate::Kbps224),
        256 => Ok(Bitrate::Kbps256),
        320 => Ok(Bitrate::Kbps320),
        other => Err(CaptureError::InvalidConfiguration(format!(
            "unsupported MP3 bitrate: {} kbps",
            other
        ))),
    }
}
