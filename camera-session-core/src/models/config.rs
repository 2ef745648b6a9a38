use serde::{Deserialize, Serialize};

use super::camera_models::{FacingMode, MediaConstraints};
use super::error::CameraError;
use crate::processing::geometry::MAX_CAPTURE_SIDE;

/// Configuration for a camera session.
///
/// Immutable once handed to `CameraSession::new`. The facing preference is
/// the only mutable setting and lives on the session instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfiguration {
    /// Width of the capture buffer in pixels, at most 65535 (default: 640).
    pub target_width: u32,

    /// JPEG quality in `[0, 1]` (default: 0.8).
    pub quality: f32,

    /// Ideal stream width sent to the device provider (default: 1920).
    pub ideal_width: u32,

    /// Ideal stream height sent to the device provider (default: 1080).
    pub ideal_height: u32,

    /// Whether the host platform exposes front/back cameras (default: false).
    pub supports_facing_switch: bool,
}

impl SessionConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if self.target_width == 0 {
            return Err("target width must be positive".into());
        }
        if self.target_width > MAX_CAPTURE_SIDE {
            return Err(format!(
                "target width must be at most {}, got {}",
                MAX_CAPTURE_SIDE, self.target_width
            ));
        }
        if !self.quality.is_finite() || !(0.0..=1.0).contains(&self.quality) {
            return Err(format!("quality must be within [0, 1], got {}", self.quality));
        }
        if self.ideal_width == 0 || self.ideal_height == 0 {
            return Err(format!(
                "invalid resolution hint: {}x{}",
                self.ideal_width, self.ideal_height
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, CameraError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CameraError::ConfigurationFailed(format!("failed to parse configuration: {}", e)))?;
        config.validate().map_err(CameraError::ConfigurationFailed)?;
        Ok(config)
    }

    /// Constraint set for an acquisition with the given facing preference.
    ///
    /// The facing mode is dropped on platforms without a switchable camera.
    pub fn constraints(&self, facing: FacingMode) -> MediaConstraints {
        MediaConstraints {
            ideal_width: self.ideal_width,
            ideal_height: self.ideal_height,
            facing: self.supports_facing_switch.then_some(facing),
        }
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            target_width: 640,
            quality: 0.8,
            ideal_width: 1920,
            ideal_height: 1080,
            supports_facing_switch: false,
        }
    }
}
