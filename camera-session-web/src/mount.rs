//! Wires a `CameraSession` to the page: preview/stop/switch controls,
//! `localStorage` preferences and the `camera_stop_clicked` event.

use std::rc::{Rc, Weak};

use wasm_bindgen_futures::spawn_local;
use web_sys::{CustomEvent, Window};

use camera_session_core::models::config::SessionConfiguration;
use camera_session_core::models::error::CameraError;
use camera_session_core::session::camera::CameraSession;

use crate::dom_controls::DomControlAdapter;
use crate::local_storage::LocalStoragePreferences;
use crate::media_devices::{describe, WebDeviceProvider};
use crate::video_surface::HtmlVideoSurface;

/// Dispatched on `window` after the stop control disposed the session.
pub const STOP_EVENT: &str = "camera_stop_clicked";

pub type WebCameraSession = CameraSession<WebDeviceProvider, HtmlVideoSurface>;

/// Build a session bound to `#cameraPreview` / `#cameraStopBtn`.
///
/// The returned session is not yet initialized; call `initialize().await`.
/// Whether the platform has switchable front/back cameras comes from
/// `config.supports_facing_switch` and is the host's decision.
pub fn mount_camera_session(config: SessionConfiguration) -> Result<Rc<WebCameraSession>, CameraError> {
    let window = web_sys::window()
        .ok_or_else(|| CameraError::ConfigurationFailed("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| CameraError::ConfigurationFailed("no document".into()))?;

    let surface = HtmlVideoSurface::new(&document)
        .map_err(|e| CameraError::ConfigurationFailed(format!("failed to create video surface: {}", describe(&e))))?;
    let video = surface.video_element();

    let mut session = CameraSession::new(WebDeviceProvider::new(), surface, config)?;
    session.set_preference_store(LocalStoragePreferences::new());

    let session = Rc::new_cyclic(move |weak: &Weak<WebCameraSession>| {
        let controls = DomControlAdapter::new(document, video, stop_handler(weak.clone()), switch_handler(weak.clone()));
        session.set_controls(controls);
        session
    });

    session.on_stop_requested(move || dispatch_stop_event(&window));
    Ok(session)
}

fn stop_handler(session: Weak<WebCameraSession>) -> impl Fn() + 'static {
    move || {
        if let Some(session) = session.upgrade() {
            spawn_local(async move { session.request_stop() });
        }
    }
}

fn switch_handler(session: Weak<WebCameraSession>) -> impl Fn() + 'static {
    move || {
        if let Some(session) = session.upgrade() {
            spawn_local(async move {
                if let Err(e) = session.switch_device().await {
                    log::warn!("Camera switch failed: {}", e);
                }
            });
        }
    }
}

fn dispatch_stop_event(window: &Window) {
    match CustomEvent::new(STOP_EVENT) {
        Ok(event) => {
            if let Err(e) = window.dispatch_event(&event) {
                log::warn!("Failed to dispatch {}: {}", STOP_EVENT, describe(&e));
            }
        }
        Err(e) => log::warn!("Failed to create {}: {}", STOP_EVENT, describe(&e)),
    }
}
