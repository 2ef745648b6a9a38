use crate::models::error::CameraError;
use crate::models::state::SessionState;

/// Event delegate for camera session notifications.
///
/// Called on the thread driving the session, never while the session's
/// state lock is held, so implementations may call back into the session.
pub trait SessionDelegate {
    /// Called when the session state changes.
    fn on_state_changed(&self, _state: &SessionState) {}

    /// Called when a lifecycle operation fails.
    fn on_error(&self, _error: &CameraError) {}

    /// Called after a user-driven stop has disposed the session.
    fn on_stop_requested(&self) {}
}
