//! Persistence Collaborators
//!
//! The runtime never does file I/O on its own. It hands calibration poses to a
//! [`CalibrationStore`] and finished clips to a [`ClipLibrary`]. JSON-file and
//! in-memory implementations of both are provided.

pub mod clips;
pub mod storage;

pub use clips::{ClipLibrary, JsonClipLibrary, MemoryClipLibrary};
pub use storage::{CalibrationStore, JsonCalibrationStore, MemoryCalibrationStore};
