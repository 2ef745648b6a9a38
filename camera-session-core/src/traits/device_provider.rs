use crate::models::camera_models::MediaConstraints;

/// Interface for the platform's camera stream source.
///
/// Implemented by:
/// - `WebDeviceProvider` (`navigator.mediaDevices.getUserMedia`)
/// - mock providers in tests
///
/// Acquisition suspends on user permission prompts and device negotiation,
/// hence the async method. Futures are not required to be `Send`: browser
/// handles live on a single thread.
#[allow(async_fn_in_trait)]
pub trait DeviceProvider {
    type Stream: StreamHandle;

    /// Request a live video stream matching `constraints`.
    ///
    /// The error string carries the platform's reason (permission denied,
    /// no device, overconstrained) and is wrapped by the session.
    async fn request_stream(&self, constraints: &MediaConstraints) -> Result<Self::Stream, String>;
}

/// An exclusively owned hardware stream.
pub trait StreamHandle {
    /// Stop every track of the stream. Must be safe to call more than once.
    fn stop(&mut self);

    /// Whether any track is still delivering frames.
    fn is_live(&self) -> bool;

    /// Human-readable device label for diagnostics.
    fn label(&self) -> String;
}
