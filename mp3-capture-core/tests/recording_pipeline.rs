//! End-to-end session tests with the real LAME codec behind the scenes.

use std::sync::Arc;

use approx::assert_relative_eq;
use parking_lot::Mutex;

use mp3_capture_core::{
    AudioBlockCallback, CaptureConfig, CaptureError, CaptureProvider, CaptureSession,
    CaptureState, LameCodec, RecordingArtifact, SessionDelegate, MP3_MIME_TYPE,
};

const RATE: u32 = 44100;

/// Hand-driven capture source: `start` publishes the callback so the test
/// can deliver blocks like a device thread would.
struct ScriptedMic {
    sample_rate: u32,
    slot: Arc<Mutex<Option<AudioBlockCallback>>>,
}

impl ScriptedMic {
    fn new(sample_rate: u32) -> (Self, Arc<Mutex<Option<AudioBlockCallback>>>) {
        let slot = Arc::new(Mutex::new(None));
        (
            Self {
                sample_rate,
                slot: Arc::clone(&slot),
            },
            slot,
        )
    }
}

impl CaptureProvider for ScriptedMic {
    fn is_available(&self) -> bool {
        true
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn start(&mut self, callback: AudioBlockCallback) -> Result<(), CaptureError> {
        *self.slot.lock() = Some(callback);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CaptureError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

fn push(slot: &Arc<Mutex<Option<AudioBlockCallback>>>, block: &[f32]) {
    let callback = slot.lock().clone().expect("capture not started");
    callback(block);
}

fn lame_session(
    rate: u32,
) -> (
    CaptureSession<ScriptedMic, LameCodec>,
    Arc<Mutex<Option<AudioBlockCallback>>>,
) {
    let (mic, slot) = ScriptedMic::new(rate);
    (CaptureSession::new(mic, CaptureConfig::new()).unwrap(), slot)
}

fn assert_mp3_frame_sync(artifact: &RecordingArtifact) {
    let bytes = artifact.as_bytes();
    assert!(bytes.len() > 4);
    // 11 set sync bits at the head of the stream.
    assert_eq!(bytes[0], 0xFF);
    assert_eq!(bytes[1] & 0xE0, 0xE0);
}

#[test]
fn one_second_of_silence_encodes_to_mp3() {
    let (mut session, slot) = lame_session(RATE);
    session.start().unwrap();

    // Delivered in device-sized blocks, like a ScriptProcessor would.
    let block = vec![0.0f32; 4096];
    let mut delivered = 0;
    while delivered < RATE as usize {
        push(&slot, &block);
        delivered += block.len();
    }

    let artifact = session.stop().unwrap();

    assert!(!artifact.is_empty());
    assert_mp3_frame_sync(&artifact);
    assert_eq!(artifact.metadata.mime_type, MP3_MIME_TYPE);
    assert_eq!(artifact.metadata.checksum.len(), 64);
    assert_relative_eq!(
        artifact.metadata.duration_secs,
        delivered as f64 / RATE as f64
    );
    assert!(session.state().is_idle());
}

#[test]
fn two_blocks_preserve_length_and_order() {
    let (mut session, slot) = lame_session(RATE);
    session.start().unwrap();

    // Distinguishable content: a ramp then a constant tail.
    let block_a: Vec<f32> = (0..4096).map(|i| (i as f32 / 4096.0) * 0.5).collect();
    let block_b = vec![0.25f32; 2048];
    push(&slot, &block_a);
    push(&slot, &block_b);

    let artifact = session.stop().unwrap();

    assert_mp3_frame_sync(&artifact);
    assert_relative_eq!(artifact.metadata.duration_secs, 6144.0 / RATE as f64);
}

#[test]
fn stop_while_idle_produces_no_artifact() {
    let (mut session, _slot) = lame_session(RATE);
    assert_eq!(session.stop().unwrap_err(), CaptureError::NotRecording);
}

#[test]
fn second_start_is_rejected_and_recording_continues() {
    let (mut session, slot) = lame_session(RATE);
    session.start().unwrap();

    assert_eq!(session.start().unwrap_err(), CaptureError::AlreadyRecording);
    assert!(session.state().is_recording());

    // The original recording is unaffected.
    push(&slot, &[0.0; 4096]);
    let artifact = session.stop().unwrap();
    assert_mp3_frame_sync(&artifact);
}

#[test]
fn empty_recording_never_errors() {
    let (mut session, _slot) = lame_session(RATE);
    session.start().unwrap();
    let artifact = session.stop().unwrap();

    // Flush-only output is acceptable; an error is not.
    assert_relative_eq!(artifact.metadata.duration_secs, 0.0);
}

#[test]
fn back_to_back_sessions_are_independent() {
    let (mut session, slot) = lame_session(RATE);

    session.start().unwrap();
    push(&slot, &[0.0; 8192]);
    let first = session.stop().unwrap();

    session.start().unwrap();
    push(&slot, &[0.0; 4096]);
    let second = session.stop().unwrap();

    assert_relative_eq!(first.metadata.duration_secs, 8192.0 / RATE as f64);
    assert_relative_eq!(second.metadata.duration_secs, 4096.0 / RATE as f64);
    assert_ne!(first.metadata.id, second.metadata.id);
}

#[derive(Default)]
struct RecordingObserver {
    states: Mutex<Vec<CaptureState>>,
    finished: Mutex<Vec<usize>>,
}

impl SessionDelegate for RecordingObserver {
    fn on_state_changed(&self, state: CaptureState) {
        self.states.lock().push(state);
    }

    fn on_error(&self, _error: &CaptureError) {}

    fn on_finished(&self, artifact: &RecordingArtifact) {
        self.finished.lock().push(artifact.len());
    }
}

#[test]
fn delegate_sees_full_lifecycle() {
    let (mut session, slot) = lame_session(RATE);
    let observer = Arc::new(RecordingObserver::default());
    session.set_delegate(Arc::clone(&observer) as Arc<dyn SessionDelegate>);

    session.start().unwrap();
    push(&slot, &[0.0; 4096]);
    let artifact = session.stop().unwrap();

    assert_eq!(
        *observer.states.lock(),
        vec![
            CaptureState::Recording,
            CaptureState::Finalizing,
            CaptureState::Idle
        ]
    );
    assert_eq!(*observer.finished.lock(), vec![artifact.len()]);
}
