use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::camera_models::FacingMode;
use crate::models::error::CameraError;
use crate::traits::preference_store::PreferenceStore;

/// In-process preference store. Forgets everything when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    facing: Option<FacingMode>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_preference(&self) -> Option<FacingMode> {
        self.facing
    }

    fn set_preference(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        self.facing = Some(facing);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PreferenceFile {
    facing: FacingMode,
}

/// Facing preference persisted as a small JSON file.
///
/// File format: `{"facing":"back"}`. A missing or unreadable file means no
/// preference has been recorded.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get_preference(&self) -> Option<FacingMode> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<PreferenceFile>(&json) {
            Ok(file) => Some(file.facing),
            Err(e) => {
                log::warn!("Ignoring corrupt preference file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set_preference(&mut self, facing: FacingMode) -> Result<(), CameraError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CameraError::StorageError(format!("failed to create directory: {}", e)))?;
        }
        let json = serde_json::to_string(&PreferenceFile { facing })
            .map_err(|e| CameraError::StorageError(format!("failed to serialize preference: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| CameraError::StorageError(format!("failed to write preference: {}", e)))?;
        Ok(())
    }
}
