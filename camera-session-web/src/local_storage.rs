//! `localStorage`-backed facing preference.

use web_sys::Storage;

use camera_session_core::models::camera_models::FacingMode;
use camera_session_core::models::error::CameraError;
use camera_session_core::traits::preference_store::PreferenceStore;

use crate::media_devices::describe;

pub const FACING_MODE_KEY: &str = "cameraFacingMode";

/// Stores the `facingMode` constraint value (`user` / `environment`).
#[derive(Debug, Clone)]
pub struct LocalStoragePreferences {
    key: String,
}

impl LocalStoragePreferences {
    pub fn new() -> Self {
        Self::with_key(FACING_MODE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage, String> {
        let window = web_sys::window().ok_or_else(|| "no global window".to_string())?;
        window
            .local_storage()
            .map_err(|e| describe(&e))?
            .ok_or_else(|| "localStorage unavailable".to_string())
    }
}

impl Default for LocalStoragePreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get_preference(&self) -> Option<FacingMode> {
        let storage = match Self::storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("Cannot read camera preference: {}", e);
                return None;
            }
        };
        let value = storage.get_item(&self.key).ok().flatten()?;
        FacingMode::from_constraint_value(&value)
    }

    fn set_preference(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        let storage = Self::storage().map_err(CameraError::StorageError)?;
        storage
            .set_item(&self.key, facing.constraint_value())
            .map_err(|e| CameraError::StorageError(format!("failed to persist facing mode: {}", describe(&e))))
    }
}
