//! # camera-session-core
//!
//! Platform-agnostic camera session core library.
//!
//! Provides the acquisition / switch / dispose lifecycle, capture buffer
//! geometry, JPEG frame encoding and facing-preference storage. Platform
//! backends (browser `getUserMedia`) implement the `DeviceProvider`,
//! `VideoSurface` and `ControlAdapter` traits and plug into the generic
//! `CameraSession`.
//!
//! ## Architecture
//!
//! ```text
//! camera-session-core (this crate)
//! ├── traits/       ← DeviceProvider, StreamHandle, VideoSurface, ControlAdapter, PreferenceStore, SessionDelegate
//! ├── models/       ← CameraError, SessionState, SessionConfiguration, FacingMode, CapturedFrame, etc.
//! ├── processing/   ← CaptureGeometry, CaptureBuffer, FrameEncoder
//! ├── session/      ← CameraSession (generic orchestrator)
//! └── storage/      ← MemoryPreferenceStore, JsonPreferenceStore
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use models::camera_models::{ControlKind, FacingMode, MediaConstraints, StreamDimensions};
pub use models::captured_frame::CapturedFrame;
pub use models::config::SessionConfiguration;
pub use models::error::CameraError;
pub use models::state::SessionState;
pub use processing::capture_buffer::CaptureBuffer;
pub use processing::frame_encoder::FrameEncoder;
pub use processing::geometry::{CaptureGeometry, MAX_CAPTURE_SIDE};
pub use session::camera::CameraSession;
pub use storage::preferences::{JsonPreferenceStore, MemoryPreferenceStore};
pub use traits::control_adapter::ControlAdapter;
pub use traits::device_provider::{DeviceProvider, StreamHandle};
pub use traits::preference_store::PreferenceStore;
pub use traits::session_delegate::SessionDelegate;
pub use traits::video_surface::VideoSurface;
