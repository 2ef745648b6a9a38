use crate::models::camera_models::StreamDimensions;
use crate::processing::capture_buffer::CaptureBuffer;

/// The session's internal playback surface.
///
/// Owns nothing but the binding to the current stream. Methods take `&self`
/// so the session never holds its state lock across `bind().await`.
#[allow(async_fn_in_trait)]
pub trait VideoSurface {
    type Stream;

    /// Bind `stream`, start playback and report the negotiated frame size.
    async fn bind(&self, stream: &Self::Stream) -> Result<StreamDimensions, String>;

    /// Pause playback and drop the stream reference.
    fn unbind(&self);

    /// Draw the current live frame into `buffer` at the buffer's dimensions.
    fn draw_frame(&self, buffer: &mut CaptureBuffer) -> Result<(), String>;
}
