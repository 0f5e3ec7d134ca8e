/// Fixed-point conversion and channel-layout helpers.
/// Scale factor mapping the nominal f32 range [-1.0, 1.0] onto signed 16-bit
/// PCM: +1.0 lands on +32767, -1.0 near -32768.
pub const PCM_SCALE: f32 = 32767.5;

/// Quantize f32 samples to signed 16-bit PCM for the encoder.
///
/// Pure and deterministic; output has the same length and order as the input.
/// Inputs are assumed bounded to [-1.0, 1.0] by the capture source and are
/// not clamped here; out-of-range values saturate at the i16 bounds via the
/// float-to-int cast.
pub fn quantize(samples: &[f32]) -> Vec<i16> {
    samples.iter().map(|&s| (s * PCM_SCALE) as i16).collect()
}

/// Downmix interleaved multi-channel audio to mono by averaging channels
/// per frame. Used by capture backends to honor the mono block contract.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let frame_count = samples.len() / channels;
    let scale = 1.0 / channels as f32;
    let mut mono = Vec::with_capacity(frame_count);
    for frame in 0..frame_count {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += samples[frame * channels + ch];
        }
        mono.push(sum * scale);
    }
    mono
}
