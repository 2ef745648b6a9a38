//! Hidden `<video>` playback element plus an offscreen `<canvas>` used as
//! the drawing target for frame capture.

use js_sys::{Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlVideoElement};

use camera_session_core::models::camera_models::StreamDimensions;
use camera_session_core::processing::capture_buffer::CaptureBuffer;
use camera_session_core::traits::video_surface::VideoSurface;

use crate::media_devices::{describe, MediaStreamHandle};

// HTMLMediaElement.readyState values
const HAVE_METADATA: u16 = 1;
const HAVE_CURRENT_DATA: u16 = 2;

pub struct HtmlVideoSurface {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl HtmlVideoSurface {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        let video = document.create_element("video")?.dyn_into::<HtmlVideoElement>()?;
        video.set_autoplay(true);
        video.set_muted(true);
        video.set_attribute("playsinline", "")?;

        let canvas = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { video, canvas, context })
    }

    /// The playback element, for mounting into the preview.
    pub fn video_element(&self) -> HtmlVideoElement {
        self.video.clone()
    }

    async fn wait_for_metadata(&self) -> Result<(), String> {
        if self.video.ready_state() >= HAVE_METADATA {
            return Ok(());
        }
        let video = &self.video;
        let loaded = Promise::new(&mut |resolve: Function, _reject: Function| {
            video.set_onloadedmetadata(Some(&resolve));
        });
        let result = JsFuture::from(loaded).await;
        video.set_onloadedmetadata(None);
        result.map(|_| ()).map_err(|e| describe(&e))
    }
}

impl VideoSurface for HtmlVideoSurface {
    type Stream = MediaStreamHandle;

    async fn bind(&self, stream: &MediaStreamHandle) -> Result<StreamDimensions, String> {
        self.video.set_src_object(Some(stream.media_stream()));
        self.wait_for_metadata().await?;

        let playing = self.video.play().map_err(|e| describe(&e))?;
        JsFuture::from(playing).await.map_err(|e| describe(&e))?;

        Ok(StreamDimensions::new(
            self.video.video_width(),
            self.video.video_height(),
        ))
    }

    fn unbind(&self) {
        if let Err(e) = self.video.pause() {
            log::warn!("Failed to pause camera video: {}", describe(&e));
        }
        self.video.set_src_object(None);
        self.video.set_onloadedmetadata(None);
    }

    fn draw_frame(&self, buffer: &mut CaptureBuffer) -> Result<(), String> {
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return Err("video has no current frame".into());
        }

        let (width, height) = (buffer.width(), buffer.height());
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }

        self.context
            .draw_image_with_html_video_element_and_dw_and_dh(
                &self.video,
                0.0,
                0.0,
                width as f64,
                height as f64,
            )
            .map_err(|e| describe(&e))?;
        let image = self
            .context
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(|e| describe(&e))?;

        let data = image.data();
        let pixels = buffer.pixels_mut();
        if data.0.len() != pixels.len() {
            return Err(format!(
                "canvas returned {} bytes, expected {}",
                data.0.len(),
                pixels.len()
            ));
        }
        pixels.copy_from_slice(&data.0);
        Ok(())
    }
}
