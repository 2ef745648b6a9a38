use thiserror::Error;

/// Errors that can occur during camera session operations.
///
/// Platform failures arrive as plain strings from the collaborator traits and
/// are wrapped here with the lifecycle step that produced them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("camera session not initialized")]
    NotInitialized,

    #[error("device switch failed: {0}")]
    DeviceSwitchFailed(String),

    #[error("another camera operation is in progress")]
    OperationInProgress,

    #[error("session was disposed while the operation was in flight")]
    Disposed,

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("frame capture failed: {0}")]
    CaptureFailed(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}
