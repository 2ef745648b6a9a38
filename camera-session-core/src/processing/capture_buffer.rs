use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::geometry::CaptureGeometry;

/// Offscreen raster used to snapshot a single video frame.
///
/// Sized once per acquisition from a `CaptureGeometry`; every draw lands in
/// these fixed dimensions.
#[derive(Debug, Clone)]
pub struct CaptureBuffer {
    geometry: CaptureGeometry,
    pixels: RgbaImage,
}

impl CaptureBuffer {
    pub fn new(geometry: CaptureGeometry) -> Self {
        Self {
            geometry,
            pixels: RgbaImage::new(geometry.width, geometry.height),
        }
    }

    pub fn geometry(&self) -> CaptureGeometry {
        self.geometry
    }

    pub fn width(&self) -> u32 {
        self.geometry.width
    }

    pub fn height(&self) -> u32 {
        self.geometry.height
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, for platforms that blit pixels directly.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Resample a native-resolution frame into the buffer.
    pub fn draw_scaled(&mut self, frame: &RgbaImage) {
        if frame.dimensions() == self.pixels.dimensions() {
            self.pixels.copy_from_slice(frame.as_raw());
            return;
        }
        self.pixels = imageops::resize(frame, self.geometry.width, self.geometry.height, FilterType::Triangle);
    }
}
