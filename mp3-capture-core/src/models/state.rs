/// Capture session state machine.
///
/// State transitions:
/// ```text
/// idle → recording → finalizing → idle
/// ```
///
/// Only one session may be recording at a time; the sample buffer, timer,
/// and encoder belong exclusively to the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Recording,
    Finalizing,
}

impl CaptureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_finalizing(&self) -> bool {
        matches!(self, Self::Finalizing)
    }
}
