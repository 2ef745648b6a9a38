//! # camera-session-web
//!
//! Browser backend for camera-session-core.
//!
//! Provides:
//! - `WebDeviceProvider`: camera streams via `navigator.mediaDevices.getUserMedia`
//! - `HtmlVideoSurface`: hidden `<video>` playback plus offscreen `<canvas>` frame grabs
//! - `DomControlAdapter`: `#cameraPreview` / `#cameraStopBtn` / switch button wiring
//! - `LocalStoragePreferences`: last facing mode under `cameraFacingMode`
//! - `mount_camera_session`: assembles all of the above and emits `camera_stop_clicked`
//!
//! ## Platform Requirements
//! - `wasm32-unknown-unknown` target, secure context (HTTPS or localhost)
//!
//! ## Usage
//! ```ignore
//! use camera_session_core::SessionConfiguration;
//! use camera_session_web::mount_camera_session;
//!
//! let session = mount_camera_session(SessionConfiguration::default())?;
//! session.initialize().await?;
//! let frame = session.capture()?;
//! send_to_server(frame.data);
//! ```

#[cfg(target_arch = "wasm32")]
pub mod dom_controls;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
#[cfg(target_arch = "wasm32")]
pub mod media_devices;
#[cfg(target_arch = "wasm32")]
pub mod mount;
#[cfg(target_arch = "wasm32")]
pub mod video_surface;

#[cfg(target_arch = "wasm32")]
pub use dom_controls::DomControlAdapter;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStoragePreferences;
#[cfg(target_arch = "wasm32")]
pub use media_devices::{MediaStreamHandle, WebDeviceProvider};
#[cfg(target_arch = "wasm32")]
pub use mount::{mount_camera_session, WebCameraSession, STOP_EVENT};
#[cfg(target_arch = "wasm32")]
pub use video_surface::HtmlVideoSurface;
