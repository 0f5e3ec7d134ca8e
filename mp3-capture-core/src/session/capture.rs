use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::encoding::codec::Mp3Codec;
use crate::encoding::stream_encoder::StreamingEncoder;
use crate::models::artifact::RecordingArtifact;
use crate::models::config::CaptureConfig;
use crate::models::error::CaptureError;
use crate::models::state::CaptureState;
use crate::processing::pcm;
use crate::processing::sample_buffer::SampleBuffer;
use crate::traits::capture_provider::{AudioBlockCallback, CaptureProvider};
use crate::traits::session_delegate::SessionDelegate;

/// Mutable session state shared with the capture callback, protected by
/// `parking_lot::Mutex`. Holding state and buffer behind one lock is what
/// makes the Recording→Finalizing transition atomic with respect to block
/// delivery: a callback racing `stop()` either appends before the drain or
/// is rejected by the state check, never half-applied.
struct SessionShared {
    state: CaptureState,
    buffer: SampleBuffer,
    capture_start: Option<Instant>,
}

impl SessionShared {
    fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            buffer: SampleBuffer::new(),
            capture_start: None,
        }
    }
}

/// Capture session orchestrator.
///
/// Generic over the capture backend via `CaptureProvider` and the codec via
/// `Mp3Codec`. Routes incoming audio blocks into the sample buffer while
/// recording; on stop, drains, quantizes, and encodes into an in-memory
/// MP3 artifact.
///
/// Multiple sessions are safely constructible; each owns its own state
/// machine, buffer, and timer. The state machine keeps a single session from
/// recording twice concurrently.
pub struct CaptureSession<P: CaptureProvider, C: Mp3Codec> {
    mic: P,
    config: CaptureConfig,
    shared: Arc<Mutex<SessionShared>>,
    delegate: Option<Arc<dyn SessionDelegate>>,
    _codec: PhantomData<fn() -> C>,
}

impl<P: CaptureProvider, C: Mp3Codec> CaptureSession<P, C> {
    pub fn new(mic: P, config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate().map_err(CaptureError::InvalidConfiguration)?;
        Ok(Self {
            mic,
            config,
            shared: Arc::new(Mutex::new(SessionShared::new())),
            delegate: None,
            _codec: PhantomData,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> CaptureState {
        self.shared.lock().state
    }

    /// Seconds since `start()`, 0.0 outside the recording state.
    pub fn elapsed_seconds(&self) -> f64 {
        let s = self.shared.lock();
        match s.capture_start {
            Some(start) if s.state.is_recording() => start.elapsed().as_secs_f64(),
            _ => 0.0,
        }
    }

    /// Start capture. Transitions: idle → recording.
    ///
    /// Fails with `AlreadyRecording` outside idle. A provider start failure
    /// aborts entirely; the session stays idle with no partial state.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        {
            let mut s = self.shared.lock();
            if !s.state.is_idle() {
                return Err(CaptureError::AlreadyRecording);
            }
            s.buffer.reset();
        }

        let shared = Arc::clone(&self.shared);
        let callback: AudioBlockCallback = Arc::new(move |block: &[f32]| {
            let mut s = shared.lock();
            // Blocks delivered outside the recording state (late or early
            // callbacks) are silently dropped.
            if s.state.is_recording() {
                s.buffer.append(block.to_vec());
            }
        });

        self.mic.start(callback)?;

        {
            let mut s = self.shared.lock();
            s.state = CaptureState::Recording;
            s.capture_start = Some(Instant::now());
        }
        log::info!("capture session started ({} Hz)", self.mic.sample_rate());
        self.notify_state(CaptureState::Recording);
        Ok(())
    }

    /// Stop capture and finalize. Transitions: recording → finalizing → idle.
    ///
    /// Fails with `NotRecording` outside the recording state. All samples
    /// accumulated up to this call are encoded; there is no discard path.
    /// On encode failure the session returns to idle and no artifact is
    /// produced.
    pub fn stop(&mut self) -> Result<RecordingArtifact, CaptureError> {
        let samples = {
            let mut s = self.shared.lock();
            if !s.state.is_recording() {
                return Err(CaptureError::NotRecording);
            }
            s.state = CaptureState::Finalizing;
            s.capture_start = None;
            s.buffer.drain()
        };
        self.notify_state(CaptureState::Finalizing);

        if let Err(e) = self.mic.stop() {
            log::warn!("capture provider stop failed: {}", e);
        }

        let result = self.encode(&samples);

        {
            let mut s = self.shared.lock();
            s.state = CaptureState::Idle;
        }
        self.notify_state(CaptureState::Idle);

        match result {
            Ok(artifact) => {
                log::info!(
                    "recording finalized: {} bytes, {:.2}s",
                    artifact.len(),
                    artifact.metadata.duration_secs
                );
                if let Some(ref delegate) = self.delegate {
                    delegate.on_finished(&artifact);
                }
                Ok(artifact)
            }
            Err(e) => {
                log::error!("finalization failed: {}", e);
                if let Some(ref delegate) = self.delegate {
                    delegate.on_error(&e);
                }
                Err(e)
            }
        }
    }

    /// Quantize and encode the drained samples into the final artifact.
    ///
    /// CPU-bound, proportional to recorded duration. Runs on the caller's
    /// thread; no new blocks can arrive while finalizing.
    fn encode(&self, samples: &[f32]) -> Result<RecordingArtifact, CaptureError> {
        let sample_rate = self.mic.sample_rate();
        let quantized = pcm::quantize(samples);

        let mut encoder = StreamingEncoder::<C>::new();
        encoder.open(sample_rate, self.config.bitrate_kbps)?;
        encoder.encode_block(&quantized)?;
        encoder.finish()?;

        let duration_secs = samples.len() as f64 / sample_rate as f64;
        Ok(RecordingArtifact::new(
            encoder.into_stream(),
            duration_secs,
            sample_rate,
            self.config.bitrate_kbps,
        ))
    }

    fn notify_state(&self, state: CaptureState) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(state);
        }
    }
}
