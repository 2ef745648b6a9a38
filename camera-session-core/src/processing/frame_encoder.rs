//! JPEG encoding for capture buffers.
//!
//! Quality is configured in `[0, 1]` and mapped onto the encoder's 1–100
//! scale. JPEG has no alpha channel, so RGBA buffers are flattened to RGB.

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{RgbImage, RgbaImage};
use sha2::{Digest, Sha256};

use crate::models::error::CameraError;

#[derive(Debug, Clone, Copy)]
pub struct FrameEncoder {
    quality: f32,
}

impl FrameEncoder {
    pub fn new(quality: f32) -> Self {
        Self { quality }
    }

    /// Configured quality in `[0, 1]`.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// Quality on the JPEG encoder's 1–100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }

    /// Encode an RGBA raster as JPEG bytes.
    pub fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, CameraError> {
        let rgb: RgbImage = image.convert();
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.jpeg_quality())
            .encode_image(&rgb)
            .map_err(|e| CameraError::EncodingFailed(format!("jpeg encoding failed: {}", e)))?;
        if out.is_empty() {
            return Err(CameraError::EncodingFailed("encoder produced no data".into()));
        }
        Ok(out)
    }
}

/// SHA-256 hex digest of encoded frame bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
