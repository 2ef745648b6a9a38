use crate::models::camera_models::FacingMode;
use crate::models::error::CameraError;

/// Persistence for the last successful facing mode.
pub trait PreferenceStore {
    fn get_preference(&self) -> Option<FacingMode>;

    fn set_preference(&mut self, facing: FacingMode) -> Result<(), CameraError>;
}
