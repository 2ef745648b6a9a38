use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::camera_models::FacingMode;
use super::error::CameraError;

/// A single encoded frame, ready to be embedded in a transport payload.
///
/// `data` is standard base64 of the JPEG bytes with no `data:` scheme prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedFrame {
    pub id: String,
    pub sequence: u64,
    pub data: String,
    pub width: u32,
    pub height: u32,
    pub quality: f32,
    pub facing: Option<FacingMode>,
    pub checksum: String,
    pub captured_at: String,
}

impl CapturedFrame {
    /// Build a frame record from encoded JPEG bytes.
    pub fn from_jpeg(
        jpeg: &[u8],
        sequence: u64,
        width: u32,
        height: u32,
        quality: f32,
        facing: Option<FacingMode>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sequence,
            data: STANDARD.encode(jpeg),
            width,
            height,
            quality,
            facing,
            checksum: crate::processing::frame_encoder::sha256_hex(jpeg),
            captured_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Decode `data` back into the raw JPEG bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, CameraError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| CameraError::EncodingFailed(format!("invalid base64 payload: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, CameraError> {
        serde_json::to_string(self)
            .map_err(|e| CameraError::EncodingFailed(format!("failed to serialize frame: {}", e)))
    }
}
