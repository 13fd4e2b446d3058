use std::path::{Path, PathBuf};

use crate::calibration::CalibrationPose;
use crate::errors::Result;

/// Persistence for the most recent calibration pose.
pub trait CalibrationStore {
    /// Returns the stored pose, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<CalibrationPose>>;

    /// Replaces the stored pose.
    fn save(&mut self, pose: &CalibrationPose) -> Result<()>;
}

/// Keeps the pose in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryCalibrationStore {
    pose: Option<CalibrationPose>,
}

impl MemoryCalibrationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pose(pose: CalibrationPose) -> Self {
        Self { pose: Some(pose) }
    }
}

impl CalibrationStore for MemoryCalibrationStore {
    fn load(&self) -> Result<Option<CalibrationPose>> {
        Ok(self.pose)
    }

    fn save(&mut self, pose: &CalibrationPose) -> Result<()> {
        self.pose = Some(*pose);
        Ok(())
    }
}

/// Stores the pose as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonCalibrationStore {
    path: PathBuf,
}

impl JsonCalibrationStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalibrationStore for JsonCalibrationStore {
    fn load(&self) -> Result<Option<CalibrationPose>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, pose: &CalibrationPose) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(pose)?)?;
        Ok(())
    }
}
