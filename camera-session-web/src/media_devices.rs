//! `getUserMedia` device provider.
//!
//! Requests a video-only `MediaStream` with ideal width/height hints and,
//! on facing-capable platforms, a `facingMode` constraint.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints, MediaStreamTrack, MediaStreamTrackState};

use camera_session_core::models::camera_models::MediaConstraints;
use camera_session_core::traits::device_provider::{DeviceProvider, StreamHandle};

/// Render a JS exception (usually a `DOMException`) as `Name: message`.
pub(crate) fn describe(error: &JsValue) -> String {
    if let Some(e) = error.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(e.name()), String::from(e.message()));
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

fn ideal(value: u32) -> Result<Object, JsValue> {
    let constraint = Object::new();
    Reflect::set(&constraint, &JsValue::from_str("ideal"), &JsValue::from(value))?;
    Ok(constraint)
}

/// `{ width: { ideal }, height: { ideal }, facingMode? }`
fn video_constraints(constraints: &MediaConstraints) -> Result<JsValue, JsValue> {
    let video = Object::new();
    Reflect::set(&video, &JsValue::from_str("width"), &ideal(constraints.ideal_width)?)?;
    Reflect::set(&video, &JsValue::from_str("height"), &ideal(constraints.ideal_height)?)?;
    if let Some(facing) = constraints.facing {
        Reflect::set(
            &video,
            &JsValue::from_str("facingMode"),
            &JsValue::from_str(facing.constraint_value()),
        )?;
    }
    Ok(video.into())
}

/// Camera access through `navigator.mediaDevices`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebDeviceProvider;

impl WebDeviceProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceProvider for WebDeviceProvider {
    type Stream = MediaStreamHandle;

    async fn request_stream(&self, constraints: &MediaConstraints) -> Result<MediaStreamHandle, String> {
        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| format!("mediaDevices unavailable: {}", describe(&e)))?;

        let request = MediaStreamConstraints::new();
        request.set_audio(&JsValue::FALSE);
        request.set_video(&video_constraints(constraints).map_err(|e| describe(&e))?);

        let promise = devices
            .get_user_media_with_constraints(&request)
            .map_err(|e| describe(&e))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| describe(&e))?
            .dyn_into::<MediaStream>()
            .map_err(|_| "getUserMedia resolved to something other than a MediaStream".to_string())?;

        log::debug!("getUserMedia granted stream {}", stream.id());
        Ok(MediaStreamHandle::new(stream))
    }
}

/// Owned `MediaStream`. Stops its tracks when dropped.
pub struct MediaStreamHandle {
    stream: MediaStream,
    stopped: bool,
}

impl MediaStreamHandle {
    fn new(stream: MediaStream) -> Self {
        Self {
            stream,
            stopped: false,
        }
    }

    pub fn media_stream(&self) -> &MediaStream {
        &self.stream
    }

    fn tracks(&self) -> impl Iterator<Item = MediaStreamTrack> {
        self.stream
            .get_tracks()
            .iter()
            .filter_map(|track| track.dyn_into::<MediaStreamTrack>().ok())
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl StreamHandle for MediaStreamHandle {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        for track in self.tracks() {
            track.stop();
        }
        self.stopped = true;
    }

    fn is_live(&self) -> bool {
        self.tracks()
            .any(|track| track.ready_state() == MediaStreamTrackState::Live)
    }

    fn label(&self) -> String {
        self.tracks()
            .next()
            .map(|track| track.label())
            .unwrap_or_else(|| self.stream.id())
    }
}

impl Drop for MediaStreamHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
