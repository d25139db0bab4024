//! Camera device implementations

use super::file::scan_directory;
use super::{CameraDevice, CameraStream, FrameSource};
use plastiscan_types::{ImageHandle, ImageSource, ScanError};
use std::path::PathBuf;
use tracing::info;

/// Used when no camera is configured. Opening always fails, which steers the
/// user to the upload path.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl CameraDevice for NoCamera {
    fn name(&self) -> &str {
        "none"
    }

    fn open(&mut self) -> Result<CameraStream, ScanError> {
        Err(ScanError::DeviceUnavailable(
            "no camera configured".to_string(),
        ))
    }
}

/// Virtual camera that replays image files from a directory, one per capture,
/// in file-name order and wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FrameDirectoryCamera {
    dir: PathBuf,
    name: String,
}

impl FrameDirectoryCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = format!("frames:{}", dir.display());
        Self { dir, name }
    }
}

impl CameraDevice for FrameDirectoryCamera {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<CameraStream, ScanError> {
        let frames = scan_directory(&self.dir)
            .map_err(|e| ScanError::DeviceUnavailable(e.to_string()))?;

        if frames.is_empty() {
            return Err(ScanError::DeviceUnavailable(format!(
                "no image frames in {}",
                self.dir.display()
            )));
        }

        info!(dir = %self.dir.display(), frames = frames.len(), "virtual camera started");
        Ok(CameraStream::new(
            self.name.clone(),
            Box::new(PlaybackSource { frames }),
        ))
    }
}

struct PlaybackSource {
    frames: Vec<PathBuf>,
}

impl FrameSource for PlaybackSource {
    fn grab(&mut self, frame: u64) -> Result<ImageHandle, ScanError> {
        let index = ((frame.max(1) - 1) % self.frames.len() as u64) as usize;
        let path = &self.frames[index];
        let bytes = std::fs::read(path).map_err(|e| {
            ScanError::DeviceUnavailable(format!("{}: {}", path.display(), e))
        })?;
        ImageHandle::from_encoded(bytes, ImageSource::Camera { frame })
    }
}
