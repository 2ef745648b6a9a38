use crate::models::camera_models::StreamDimensions;
use crate::models::error::CameraError;

/// Largest buffer side the JPEG encoder accepts.
pub const MAX_CAPTURE_SIDE: u32 = 65_535;

/// Capture buffer geometry derived from one acquisition.
///
/// `aspect_ratio` is height over width of the negotiated stream. The buffer is
/// always `target_width` wide and keeps that ratio, so frames are never
/// stretched regardless of the device's native resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureGeometry {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
}

impl CaptureGeometry {
    /// Compute the buffer geometry for `target_width` and the stream's native size.
    pub fn for_stream(target_width: u32, native: StreamDimensions) -> Result<Self, CameraError> {
        if target_width == 0 {
            return Err(CameraError::ConfigurationFailed("target width must be positive".into()));
        }
        if target_width > MAX_CAPTURE_SIDE {
            return Err(CameraError::ConfigurationFailed(format!(
                "target width {} exceeds {}",
                target_width, MAX_CAPTURE_SIDE
            )));
        }
        if native.is_empty() {
            return Err(CameraError::CameraUnavailable(format!(
                "stream reported degenerate dimensions {}x{}",
                native.width, native.height
            )));
        }

        let aspect_ratio = native.height as f64 / native.width as f64;
        let height = (target_width as f64 * aspect_ratio).round().max(1.0);
        if height > MAX_CAPTURE_SIDE as f64 {
            return Err(CameraError::CameraUnavailable(format!(
                "stream {}x{} needs a {}x{} buffer, taller than {}",
                native.width, native.height, target_width, height, MAX_CAPTURE_SIDE
            )));
        }

        Ok(Self {
            width: target_width,
            height: height as u32,
            aspect_ratio,
        })
    }
}
