use crate::models::artifact::RecordingArtifact;
use crate::models::error::CaptureError;
use crate::models::state::CaptureState;

/// Event delegate for capture session notifications.
///
/// Methods may be called from the thread driving `start`/`stop`, not a UI
/// thread. Implementations should marshal accordingly.
pub trait SessionDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: CaptureState);

    /// Called when finalization fails; the session has returned to idle.
    fn on_error(&self, error: &CaptureError);

    /// Called when a recording finishes and the artifact is ready.
    fn on_finished(&self, artifact: &RecordingArtifact);
}
