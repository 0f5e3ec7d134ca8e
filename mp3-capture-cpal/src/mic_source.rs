//! cpal microphone capture provider.
//!
//! Opens the default input device and delivers mono f32 blocks via the
//! `AudioBlockCallback`. The `cpal::Stream` is not `Send`, so it lives on a
//! dedicated capture thread controlled by an atomic flag, the same shape as
//! other platform backends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use parking_lot::Mutex;

use mp3_capture_core::processing::pcm::downmix_to_mono;
use mp3_capture_core::{AudioBlockCallback, CaptureError, CaptureProvider};

/// Microphone capture via cpal's default input device.
///
/// The device's native sample rate is detected at construction and reported
/// through `sample_rate()`; the encoder must be opened with exactly that
/// value.
pub struct CpalMicSource {
    device_name: String,
    sample_rate: u32,
    channels: u16,
    running: Arc<AtomicBool>,
    capture_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl CpalMicSource {
    /// Open the system default input device and detect its native format.
    pub fn default_device() -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| CaptureError::DeviceAccessDenied("no default input device".into()))?;

        let config = device.default_input_config().map_err(|e| {
            CaptureError::DeviceAccessDenied(format!("failed to query input format: {}", e))
        })?;

        Ok(Self {
            device_name: device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate: config.sample_rate().0,
            channels: config.channels(),
            running: Arc::new(AtomicBool::new(false)),
            capture_handle: Mutex::new(None),
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl CaptureProvider for CpalMicSource {
    fn is_available(&self) -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start(&mut self, callback: AudioBlockCallback) -> Result<(), CaptureError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyRecording);
        }

        log::info!(
            "starting capture on '{}' at {} Hz",
            self.device_name,
            self.sample_rate
        );
        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);
        let channels = self.channels as usize;

        let handle = thread::Builder::new()
            .name("cpal-mic-capture".into())
            .spawn(move || {
                if let Err(e) = capture_loop(running.clone(), channels, callback) {
                    log::error!("mic capture error: {}", e);
                    running.store(false, Ordering::SeqCst);
                }
            })
            .map_err(|e| CaptureError::DeviceAccessDenied(format!("capture thread: {}", e)))?;

        *self.capture_handle.lock() = Some(handle);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.capture_handle.lock().take() {
            let _ = handle.join();
        }
        Ok(())
    }
}

/// Body of the capture thread: owns the stream for its whole lifetime.
fn capture_loop(
    running: Arc<AtomicBool>,
    channels: usize,
    callback: AudioBlockCallback,
) -> Result<(), CaptureError> {
    // Reacquired here because cpal streams must be built and dropped on the
    // thread that owns them.
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| CaptureError::DeviceAccessDenied("no default input device".into()))?;
    let supported = device.default_input_config().map_err(|e| {
        CaptureError::DeviceAccessDenied(format!("failed to query input format: {}", e))
    })?;
    let sample_format = supported.sample_format();
    let config: cpal::StreamConfig = supported.into();

    let err_fn = |err: cpal::StreamError| log::error!("input stream error: {}", err);

    let stream = match sample_format {
        SampleFormat::F32 => device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    callback(&downmix_to_mono(data, channels));
                },
                err_fn,
                None,
            )
            .map_err(|e| CaptureError::DeviceAccessDenied(format!("build stream: {}", e)))?,

        SampleFormat::I16 => device
            .build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let as_f32 = i16_to_f32(data);
                    callback(&downmix_to_mono(&as_f32, channels));
                },
                err_fn,
                None,
            )
            .map_err(|e| CaptureError::DeviceAccessDenied(format!("build stream: {}", e)))?,

        other => {
            return Err(CaptureError::DeviceAccessDenied(format!(
                "unsupported sample format: {:?}",
                other
            )))
        }
    };

    stream
        .play()
        .map_err(|e| CaptureError::DeviceAccessDenied(format!("start stream: {}", e)))?;

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(50));
    }

    drop(stream);
    Ok(())
}

/// Widen i16 samples into the nominal f32 range [-1.0, 1.0].
fn i16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / 32768.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i16_full_scale_maps_into_unit_range() {
        let converted = i16_to_f32(&[i16::MIN, 0, i16::MAX]);
        assert_eq!(converted[0], -1.0);
        assert_eq!(converted[1], 0.0);
        assert!(converted[2] < 1.0 && converted[2] > 0.999);
    }
}
