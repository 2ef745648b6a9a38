use serde::{Deserialize, Serialize};

/// Which physical camera to request on multi-camera devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    Front,
    Back,
}

impl FacingMode {
    /// The opposite camera.
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    /// Value of the `facingMode` media constraint.
    pub fn constraint_value(self) -> &'static str {
        match self {
            Self::Front => "user",
            Self::Back => "environment",
        }
    }

    /// Parse a `facingMode` constraint value (`user` / `environment`).
    pub fn from_constraint_value(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::Front),
            "environment" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Constraint set handed to the device provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    /// Only set on platforms that can switch between physical cameras.
    pub facing: Option<FacingMode>,
}

/// Native frame size negotiated by the platform.
///
/// May differ from the ideal resolution hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamDimensions {
    pub width: u32,
    pub height: u32,
}

impl StreamDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// UI controls a session mounts through the `ControlAdapter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// The rendering surface holding the live video.
    Preview,
    /// Externally provided stop control paired with the preview.
    StopButton,
    /// Front/back toggle, created only on facing-capable platforms.
    SwitchButton,
}
